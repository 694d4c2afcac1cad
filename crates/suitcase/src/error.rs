use crate::test_case::TestCaseId;
use thiserror::Error;

/// Errors that abort a suite run, or prevent a suite from being declared.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// A suite was declared without members.
    #[error("test suite '{suite}' has no members")]
    EmptySuite {
        /// The display name of the suite.
        suite: String,
    },

    /// A suite lists the same member more than once.
    #[error("test suite '{suite}' lists member '{member}' more than once")]
    DuplicateMember {
        /// The display name of the suite.
        suite: String,
        /// The repeated member.
        member: TestCaseId,
    },

    /// Two test cases with the same name were registered to a catalog.
    #[error("the test case name '{0}' is conflicted")]
    DuplicateTestCase(TestCaseId),

    /// A declared member does not resolve to a runnable test case.
    #[error("test case '{0}' is not registered")]
    MemberNotFound(TestCaseId),

    /// The executor failed outright while running a member.
    #[error("executor failed while running '{member}'")]
    Executor {
        /// The member being run when the fault happened.
        member: TestCaseId,
        /// What went wrong.
        #[source]
        fault: ExecutorFault,
    },
}

/// An error of the execution engine itself, as opposed to a failing test.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExecutorFault {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ExecutorFault {
    /// Create a fault carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a fault caused by another error.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
