use std::{borrow::Cow, fmt};

/// The signature of test bodies and lifecycle hooks after conversion
/// through [`Termination`](crate::Termination).
pub type TestFn = fn() -> anyhow::Result<()>;

/// An opaque reference to a test case, by name.
///
/// The suite only refers to test cases through their identifiers. Resolving
/// an identifier to something runnable is the job of a [`Catalog`](crate::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestCaseId(Cow<'static, str>);

impl TestCaseId {
    /// Return the name of the referenced test case.
    #[inline]
    pub fn as_str(&self) -> &str {
        &*self.0
    }
}

impl From<&'static str> for TestCaseId {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for TestCaseId {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl AsRef<str> for TestCaseId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TestCaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle hooks of a test case.
#[derive(Debug, Clone, Copy)]
pub struct Hooks {
    /// Run once before the first selected test.
    pub before_all: Option<TestFn>,
    /// Run once after the last selected test.
    pub after_all: Option<TestFn>,
    /// Run before every selected test.
    pub before_each: Option<TestFn>,
    /// Run after every selected test, even if the test failed.
    pub after_each: Option<TestFn>,
}

impl Hooks {
    /// No hooks at all.
    pub const NONE: Self = Self {
        before_all: None,
        after_all: None,
        before_each: None,
        after_each: None,
    };
}

impl Default for Hooks {
    fn default() -> Self {
        Self::NONE
    }
}

/// A single test inside a test case.
///
/// Usually built with the [`test!`](crate::test) macro.
#[derive(Debug, Clone, Copy)]
pub struct Test {
    /// The test name, unique within its test case.
    pub name: &'static str,
    /// Whether the test is skipped unless ignored tests are requested.
    pub ignored: bool,
    /// Why the test is ignored.
    pub ignore_reason: Option<&'static str>,
    /// The test body.
    pub run: TestFn,
}

/// A named group of tests sharing lifecycle hooks.
///
/// Test cases are owned by the crate defining them and are typically
/// declared as `static` items.
#[derive(Debug)]
pub struct TestCase {
    /// The name suite members refer to.
    pub name: &'static str,
    /// Hooks run around the tests.
    pub hooks: Hooks,
    /// The tests, in execution order.
    pub tests: &'static [Test],
}

impl TestCase {
    /// Return the identifier referring to this test case.
    #[inline]
    pub fn id(&self) -> TestCaseId {
        TestCaseId::from(self.name)
    }

    /// Return the full name of a test in this case, `<case>::<test>`.
    pub fn qualified_name(&self, test: &Test) -> String {
        format!("{}::{}", self.name, test.name)
    }
}
