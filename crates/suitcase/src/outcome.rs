use crate::test_case::TestCaseId;

/// The outcome of a single test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// The test ran and passed.
    Passed,
    /// The test, or one of the hooks around it, failed with the message.
    Failed(String),
    /// The test is marked as ignored, with an optional reason.
    Ignored(Option<&'static str>),
    /// The test was not selected by the filter.
    FilteredOut,
}

/// The outcome of a single test, labeled with the test name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    /// The test name, without the test case prefix.
    pub name: &'static str,
    /// What happened to the test.
    pub outcome: TestOutcome,
}

/// The outcome of executing one test case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseOutcome {
    tests: Vec<TestReport>,
    fixture_failure: Option<String>,
}

impl CaseOutcome {
    /// An outcome without any test reports, counted as passed.
    pub fn passed() -> Self {
        Self::default()
    }

    /// An outcome failed by its case-level fixture.
    pub fn fixture_failed(message: impl Into<String>) -> Self {
        Self {
            tests: vec![],
            fixture_failure: Some(message.into()),
        }
    }

    pub(crate) fn push(&mut self, name: &'static str, outcome: TestOutcome) {
        self.tests.push(TestReport { name, outcome });
    }

    pub(crate) fn set_fixture_failure(&mut self, message: String) {
        self.fixture_failure = Some(message);
    }

    /// Append the outcome of one test.
    pub fn with_test(mut self, name: &'static str, outcome: TestOutcome) -> Self {
        self.push(name, outcome);
        self
    }

    /// Return the per-test reports in execution order.
    #[inline]
    pub fn tests(&self) -> &[TestReport] {
        &self.tests[..]
    }

    /// Return the failure of `before_all` or `after_all`, if any.
    #[inline]
    pub fn fixture_failure(&self) -> Option<&str> {
        self.fixture_failure.as_deref()
    }

    /// Return whether no test and no fixture failed.
    pub fn is_passed(&self) -> bool {
        self.fixture_failure.is_none()
            && self
                .tests
                .iter()
                .all(|t| !matches!(t.outcome, TestOutcome::Failed(..)))
    }

    /// Count the tests whose outcome satisfies `pred`.
    pub fn count(&self, pred: impl Fn(&TestOutcome) -> bool) -> usize {
        self.tests.iter().filter(|t| pred(&t.outcome)).count()
    }

    /// Summarize why this case failed, or `None` if it passed.
    pub fn cause(&self) -> Option<String> {
        if self.is_passed() {
            return None;
        }

        let failed: Vec<&str> = self
            .tests
            .iter()
            .filter(|t| matches!(t.outcome, TestOutcome::Failed(..)))
            .map(|t| t.name)
            .collect();

        let mut cause = String::new();
        if let Some(ref msg) = self.fixture_failure {
            cause.push_str("fixture failed: ");
            cause.push_str(msg);
        }
        if !failed.is_empty() {
            if !cause.is_empty() {
                cause.push_str("; ");
            }
            cause.push_str(&format!(
                "{} of {} tests failed: {}",
                failed.len(),
                self.tests.len(),
                failed.join(", ")
            ));
        }
        Some(cause)
    }
}

/// A failed member of a suite together with the failure cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberError {
    /// The failed member.
    pub member: TestCaseId,
    /// A one-line summary of what failed.
    pub cause: String,
}

/// The aggregate result of running a suite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteResult {
    /// The number of members that passed.
    pub passed: usize,
    /// The number of members that failed.
    pub failed: usize,
    /// Failed members in declaration order.
    pub errors: Vec<MemberError>,
    /// Every executed member with its detailed outcome, in declaration order.
    pub cases: Vec<(TestCaseId, CaseOutcome)>,
}

impl SuiteResult {
    /// Return whether every member passed.
    pub fn is_passed(&self) -> bool {
        self.failed == 0
    }

    pub(crate) fn append(&mut self, member: TestCaseId, outcome: CaseOutcome) {
        match outcome.cause() {
            None => self.passed += 1,
            Some(cause) => {
                self.failed += 1;
                self.errors.push(MemberError {
                    member: member.clone(),
                    cause,
                });
            }
        }
        self.cases.push((member, outcome));
    }
}
