/// Whether to run tests that are marked as ignored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RunIgnored {
    /// Run only the tests that are not ignored.
    No,
    /// Run only the ignored tests.
    Only,
    /// Run both.
    Yes,
}

impl Default for RunIgnored {
    fn default() -> Self {
        RunIgnored::No
    }
}

/// Selection of tests by name.
#[derive(Clone, Debug, Default)]
pub struct TestFilter {
    /// Only run tests whose qualified name matches this pattern.
    pub pattern: Option<String>,
    /// Match names exactly rather than by substring.
    pub exact: bool,
    /// Skip tests whose qualified name matches any of these patterns.
    pub skip_patterns: Vec<String>,
    /// Which of the ignored and not ignored tests to run.
    pub run_ignored: RunIgnored,
}

impl TestFilter {
    /// Return whether the test with the given qualified name is excluded by name.
    pub fn is_filtered_out(&self, test_name: &str) -> bool {
        let matches_filter = |pat: &str| {
            if self.exact {
                test_name == pat
            } else {
                test_name.contains(pat)
            }
        };

        if self
            .pattern
            .as_ref()
            .map_or(false, |pat| !matches_filter(pat))
        {
            return true;
        }

        self.skip_patterns.iter().any(|pat| matches_filter(pat))
    }

    /// Return whether a test with the given ignore flag should be run.
    pub fn runs(&self, ignored: bool) -> bool {
        match self.run_ignored {
            RunIgnored::No => !ignored,
            RunIgnored::Only => ignored,
            RunIgnored::Yes => true,
        }
    }
}
