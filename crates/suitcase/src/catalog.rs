use crate::{
    error::SuiteError,
    test_case::{TestCase, TestCaseId},
};
use indexmap::{map::Entry, IndexMap};

/// The set of test cases that suite members can resolve to.
#[derive(Debug, Default)]
pub struct Catalog {
    cases: IndexMap<&'static str, &'static TestCase>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test case.
    pub fn add(&mut self, case: &'static TestCase) -> Result<(), SuiteError> {
        match self.cases.entry(case.name) {
            Entry::Occupied(..) => Err(SuiteError::DuplicateTestCase(case.id())),
            Entry::Vacant(entry) => {
                entry.insert(case);
                Ok(())
            }
        }
    }

    /// Resolve an identifier to the registered test case.
    pub fn resolve(&self, id: &TestCaseId) -> Result<&'static TestCase, SuiteError> {
        self.cases
            .get(id.as_str())
            .copied()
            .ok_or_else(|| SuiteError::MemberNotFound(id.clone()))
    }

    /// Return the number of registered test cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Return whether no test case is registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_case::Hooks;

    static FIRST: TestCase = TestCase {
        name: "First",
        hooks: Hooks::NONE,
        tests: &[],
    };

    static FIRST_AGAIN: TestCase = TestCase {
        name: "First",
        hooks: Hooks::NONE,
        tests: &[],
    };

    #[test]
    fn resolves_registered_case() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        catalog.add(&FIRST).unwrap();
        let case = catalog.resolve(&TestCaseId::from("First")).unwrap();
        assert!(std::ptr::eq(case, &FIRST));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn unknown_member() {
        let catalog = Catalog::new();
        let err = catalog.resolve(&TestCaseId::from("Missing")).unwrap_err();
        assert!(matches!(err, SuiteError::MemberNotFound(ref id) if id.as_str() == "Missing"));
    }

    #[test]
    fn conflicted_name() {
        let mut catalog = Catalog::new();
        catalog.add(&FIRST).unwrap();
        let err = catalog.add(&FIRST_AGAIN).unwrap_err();
        assert!(matches!(err, SuiteError::DuplicateTestCase(..)));
        assert_eq!(catalog.len(), 1);
    }
}
