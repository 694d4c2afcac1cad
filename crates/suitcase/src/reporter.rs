//! Observers of a suite run.

mod console;
mod log;
mod logfile;

pub use self::{console::ConsoleReporter, log::LogReporter, logfile::LogfileReporter};

use crate::{
    outcome::{CaseOutcome, SuiteResult},
    suite::SuiteDescriptor,
    test_case::TestCaseId,
};

/// Receives the events of a suite run.
///
/// Events are delivered in declared member order, whatever the order the
/// executor finished the members in.
pub trait Reporter {
    /// Called once all members of the suite have been resolved.
    fn suite_starting(&self, desc: &SuiteDescriptor);
    /// Called after the last member, with the aggregate result.
    fn suite_ended(&self, desc: &SuiteDescriptor, result: &SuiteResult);

    /// Called when a member is handed to the executor.
    fn case_starting(&self, member: &TestCaseId);
    /// Called with the outcome of a member.
    fn case_ended(&self, member: &TestCaseId, outcome: &CaseOutcome);
}

macro_rules! impl_reporter_body {
    () => {
        fn suite_starting(&self, desc: &SuiteDescriptor) {
            (**self).suite_starting(desc)
        }

        fn suite_ended(&self, desc: &SuiteDescriptor, result: &SuiteResult) {
            (**self).suite_ended(desc, result)
        }

        fn case_starting(&self, member: &TestCaseId) {
            (**self).case_starting(member)
        }

        fn case_ended(&self, member: &TestCaseId, outcome: &CaseOutcome) {
            (**self).case_ended(member, outcome)
        }
    };
}

impl<R: ?Sized> Reporter for &R
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R: ?Sized> Reporter for Box<R>
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R: ?Sized> Reporter for std::rc::Rc<R>
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R: ?Sized> Reporter for std::sync::Arc<R>
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R> Reporter for Vec<R>
where
    R: Reporter,
{
    fn suite_starting(&self, desc: &SuiteDescriptor) {
        self.iter().for_each(|r| r.suite_starting(desc))
    }

    fn suite_ended(&self, desc: &SuiteDescriptor, result: &SuiteResult) {
        self.iter().for_each(|r| r.suite_ended(desc, result))
    }

    fn case_starting(&self, member: &TestCaseId) {
        self.iter().for_each(|r| r.case_starting(member))
    }

    fn case_ended(&self, member: &TestCaseId, outcome: &CaseOutcome) {
        self.iter().for_each(|r| r.case_ended(member, outcome))
    }
}

pub(crate) fn plural_suffix(n: usize) -> &'static str {
    match n {
        1 => "",
        _ => "s",
    }
}
