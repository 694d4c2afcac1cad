use super::{plural_suffix, Reporter};
use crate::{
    outcome::{CaseOutcome, SuiteResult, TestOutcome},
    suite::SuiteDescriptor,
    test_case::TestCaseId,
};

/// Reports suite runs through the `log` facade.
#[derive(Debug, Clone)]
pub struct LogReporter {
    _p: (),
}

impl LogReporter {
    /// Create a new reporter.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { _p: () }
    }
}

impl Reporter for LogReporter {
    fn suite_starting(&self, desc: &SuiteDescriptor) {
        let n = desc.members().len();
        log::info!(
            "running suite '{}' ({} member{})",
            desc.display_name(),
            n,
            plural_suffix(n)
        );
    }

    fn suite_ended(&self, desc: &SuiteDescriptor, result: &SuiteResult) {
        if result.is_passed() {
            log::info!("suite '{}': ok", desc.display_name());
        } else {
            log::error!(
                "suite '{}': FAILED ({} of {} members)",
                desc.display_name(),
                result.failed,
                result.passed + result.failed
            );
        }
    }

    fn case_starting(&self, member: &TestCaseId) {
        log::debug!("start: {}", member);
    }

    fn case_ended(&self, member: &TestCaseId, outcome: &CaseOutcome) {
        for test in outcome.tests() {
            match test.outcome {
                TestOutcome::Passed => log::info!("{}::{}: ok", member, test.name),
                TestOutcome::Failed(ref msg) => {
                    log::error!("{}::{}: FAILED: {}", member, test.name, msg)
                }
                TestOutcome::Ignored(..) => log::info!("{}::{}: ignored", member, test.name),
                TestOutcome::FilteredOut => log::trace!("{}::{}: filtered out", member, test.name),
            }
        }
        if let Some(msg) = outcome.fixture_failure() {
            log::error!("{}: {}", member, msg);
        }
    }
}
