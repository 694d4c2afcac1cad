use crate::{error::SuiteError, test_case::TestCaseId};
use std::collections::HashSet;

/// The static description of a test suite.
///
/// A descriptor is built once when the test run starts and is immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteDescriptor {
    display_name: String,
    members: Vec<TestCaseId>,
}

impl SuiteDescriptor {
    /// Create a descriptor, rejecting empty and duplicated member lists.
    pub fn new<I>(display_name: impl Into<String>, members: I) -> Result<Self, SuiteError>
    where
        I: IntoIterator,
        I::Item: Into<TestCaseId>,
    {
        let desc = Self {
            display_name: display_name.into(),
            members: members.into_iter().map(Into::into).collect(),
        };
        desc.validate()?;
        Ok(desc)
    }

    #[doc(hidden)] // private API, used by test_suite!().
    pub fn __declare(display_name: &'static str, members: &[&'static str]) -> Self {
        Self {
            display_name: display_name.into(),
            members: members.iter().map(|&name| TestCaseId::from(name)).collect(),
        }
    }

    /// Return the human-readable label of the suite.
    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Return the members in declaration order.
    #[inline]
    pub fn members(&self) -> &[TestCaseId] {
        &self.members[..]
    }

    /// Check that the member list is non-empty and free of duplicates.
    pub fn validate(&self) -> Result<(), SuiteError> {
        if self.members.is_empty() {
            return Err(SuiteError::EmptySuite {
                suite: self.display_name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for member in &self.members {
            if !seen.insert(member.as_str()) {
                return Err(SuiteError::DuplicateMember {
                    suite: self.display_name.clone(),
                    member: member.clone(),
                });
            }
        }

        Ok(())
    }
}

/// A statically declared test suite.
///
/// Implementations are usually generated by [`test_suite!`](crate::test_suite).
pub trait SuiteRegistry {
    /// Return the descriptor of this suite.
    fn describe(&self) -> SuiteDescriptor;
}

impl<T: ?Sized> SuiteRegistry for &T
where
    T: SuiteRegistry,
{
    #[inline]
    fn describe(&self) -> SuiteDescriptor {
        (**self).describe()
    }
}

impl<T: ?Sized> SuiteRegistry for Box<T>
where
    T: SuiteRegistry,
{
    #[inline]
    fn describe(&self) -> SuiteDescriptor {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn members_keep_declaration_order() {
        let desc = SuiteDescriptor::new("suite", vec!["c", "a", "b"]).unwrap();
        let names: Vec<_> = desc.members().iter().map(TestCaseId::as_str).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(desc.display_name(), "suite");
    }

    #[test]
    fn empty_suite_is_rejected() {
        let err = SuiteDescriptor::new("empty", Vec::<&'static str>::new()).unwrap_err();
        assert!(matches!(err, SuiteError::EmptySuite { ref suite } if suite == "empty"));
    }

    #[test]
    fn duplicated_member_is_rejected() {
        let err = SuiteDescriptor::new("dup", vec!["a", "b", "a"]).unwrap_err();
        match err {
            SuiteError::DuplicateMember { member, .. } => assert_eq!(member.as_str(), "a"),
            err => panic!("unexpected error: {}", err),
        }
    }

    #[test]
    fn declared_descriptor_can_be_validated() {
        let desc = SuiteDescriptor::__declare("declared", &["x", "x"]);
        assert!(desc.validate().is_err());
    }
}
