use super::Reporter;
use crate::{
    outcome::{CaseOutcome, SuiteResult, TestOutcome},
    suite::SuiteDescriptor,
    test_case::TestCaseId,
};
use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::Path,
    sync::Mutex,
};

/// Writes one line per test to a file, in the format of libtest's `--logfile`.
#[derive(Debug)]
pub struct LogfileReporter {
    out: Mutex<BufWriter<File>>,
}

impl LogfileReporter {
    /// Create or truncate the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            out: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write_case(&self, member: &TestCaseId, outcome: &CaseOutcome) -> io::Result<()> {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        for test in outcome.tests() {
            let status = match test.outcome {
                TestOutcome::Passed => "ok",
                TestOutcome::Failed(..) => "failed",
                TestOutcome::Ignored(..) => "ignored",
                TestOutcome::FilteredOut => continue,
            };
            writeln!(out, "{} {}::{}", status, member, test.name)?;
        }
        Ok(())
    }
}

impl Reporter for LogfileReporter {
    fn suite_starting(&self, _: &SuiteDescriptor) {}

    fn suite_ended(&self, _: &SuiteDescriptor, _: &SuiteResult) {
        if let Ok(mut out) = self.out.lock() {
            if let Err(err) = out.flush() {
                log::warn!("failed to flush the logfile: {}", err);
            }
        }
    }

    fn case_starting(&self, _: &TestCaseId) {}

    fn case_ended(&self, member: &TestCaseId, outcome: &CaseOutcome) {
        if let Err(err) = self.write_case(member, outcome) {
            log::warn!("failed to write the logfile: {}", err);
        }
    }
}
