use super::{plural_suffix, Reporter};
use crate::{
    cli::ColorConfig,
    outcome::{CaseOutcome, SuiteResult, TestOutcome},
    suite::SuiteDescriptor,
    test_case::TestCaseId,
};
use std::{
    fmt,
    io::{self, Write as _},
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, StandardStreamLock, WriteColor};

struct Colored<T> {
    val: T,
    spec: Option<ColorSpec>,
}

impl<T> Colored<T> {
    fn fg(mut self, color: Color) -> Self {
        self.spec
            .get_or_insert_with(ColorSpec::new)
            .set_fg(Some(color));
        self
    }

    fn fmt_colored<W: ?Sized>(&self, w: &mut W) -> io::Result<()>
    where
        T: fmt::Display,
        W: WriteColor,
    {
        if let Some(ref spec) = self.spec {
            w.set_color(spec)?;
        }
        write!(w, "{}", &self.val)?;
        if let Some(..) = self.spec {
            w.reset()?;
        }
        Ok(())
    }
}

fn colored<T>(val: T) -> Colored<T> {
    Colored { val, spec: None }
}

/// Prints suite runs to the standard output, in the manner of libtest.
pub struct ConsoleReporter {
    stream: StandardStream,
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a reporter writing to the standard output.
    pub fn new(color: ColorConfig, quiet: bool) -> Self {
        Self {
            stream: StandardStream::stdout(match color {
                ColorConfig::Auto => ColorChoice::Auto,
                ColorConfig::Always => ColorChoice::Always,
                ColorConfig::Never => ColorChoice::Never,
            }),
            quiet,
        }
    }

    fn print_case(
        &self,
        w: &mut StandardStreamLock<'_>,
        member: &TestCaseId,
        outcome: &CaseOutcome,
    ) -> io::Result<()> {
        if self.quiet {
            let status = if outcome.is_passed() {
                colored("ok").fg(Color::Green)
            } else {
                colored("FAILED").fg(Color::Red)
            };
            write!(w, "case {} ... ", member)?;
            status.fmt_colored(w)?;
            return writeln!(w);
        }

        for test in outcome.tests() {
            let status = match test.outcome {
                TestOutcome::Passed => colored("ok").fg(Color::Green),
                TestOutcome::Failed(..) => colored("FAILED").fg(Color::Red),
                TestOutcome::Ignored(..) => colored("ignored").fg(Color::Yellow),
                TestOutcome::FilteredOut => continue,
            };
            write!(w, "test {}::{} ... ", member, test.name)?;
            status.fmt_colored(w)?;
            if let TestOutcome::Ignored(Some(reason)) = test.outcome {
                write!(w, ", {}", reason)?;
            }
            writeln!(w)?;
        }

        if outcome.fixture_failure().is_some() {
            write!(w, "fixture {} ... ", member)?;
            colored("FAILED").fg(Color::Red).fmt_colored(w)?;
            writeln!(w)?;
        }

        Ok(())
    }

    fn print_summary(&self, w: &mut StandardStreamLock<'_>, result: &SuiteResult) -> io::Result<()> {
        if !result.errors.is_empty() {
            writeln!(w)?;
            writeln!(w, "failures:")?;
            for (member, outcome) in result.cases.iter().filter(|(_, o)| !o.is_passed()) {
                writeln!(w)?;
                writeln!(w, "---- {} ----", member)?;
                if let Some(msg) = outcome.fixture_failure() {
                    writeln!(w, "{}", msg)?;
                }
                for test in outcome.tests() {
                    if let TestOutcome::Failed(ref msg) = test.outcome {
                        writeln!(w, "{}: {}", test.name, msg)?;
                    }
                }
            }

            writeln!(w)?;
            writeln!(w, "failures:")?;
            for error in &result.errors {
                writeln!(w, "    {}: {}", error.member, error.cause)?;
            }
        }

        let mut tests_passed = 0;
        let mut tests_failed = 0;
        let mut ignored = 0;
        let mut filtered_out = 0;
        for (_, outcome) in &result.cases {
            for test in outcome.tests() {
                match test.outcome {
                    TestOutcome::Passed => tests_passed += 1,
                    TestOutcome::Failed(..) => tests_failed += 1,
                    TestOutcome::Ignored(..) => ignored += 1,
                    TestOutcome::FilteredOut => filtered_out += 1,
                }
            }
        }

        let status = if result.is_passed() {
            colored("ok").fg(Color::Green)
        } else {
            colored("FAILED").fg(Color::Red)
        };
        writeln!(w)?;
        write!(w, "suite result: ")?;
        status.fmt_colored(w)?;
        writeln!(
            w,
            ". {passed} passed; {failed} failed; \
             tests: {tests_passed} passed; {tests_failed} failed; {ignored} ignored; {filtered_out} filtered out",
            passed = result.passed,
            failed = result.failed,
            tests_passed = tests_passed,
            tests_failed = tests_failed,
            ignored = ignored,
            filtered_out = filtered_out,
        )?;
        writeln!(w)?;

        Ok(())
    }
}

impl Reporter for ConsoleReporter {
    fn suite_starting(&self, desc: &SuiteDescriptor) {
        let mut w = self.stream.lock();
        let n = desc.members().len();
        let _ = writeln!(
            w,
            "running suite '{}' ({} member{})",
            desc.display_name(),
            n,
            plural_suffix(n)
        );
    }

    fn suite_ended(&self, _: &SuiteDescriptor, result: &SuiteResult) {
        let mut w = self.stream.lock();
        let _ = self.print_summary(&mut w, result);
    }

    fn case_starting(&self, _: &TestCaseId) {}

    fn case_ended(&self, member: &TestCaseId, outcome: &CaseOutcome) {
        let mut w = self.stream.lock();
        let _ = self.print_case(&mut w, member, outcome);
    }
}
