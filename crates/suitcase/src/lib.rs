/*!
Static test suite declarations and an ordered suite runner.

A *test case* is a named group of tests sharing lifecycle hooks. A *test
suite* is a named, ordered, non-empty list of test case names that are run
together and produce a single report.

```no_run
use suitcase::{Hooks, TestCase};

fn adds_up() {
    assert_eq!(1 + 1, 2);
}

fn parses() -> anyhow::Result<()> {
    let n: u32 = "42".parse()?;
    anyhow::ensure!(n == 42, "unexpected value: {}", n);
    Ok(())
}

static ARITHMETIC_TEST: TestCase = TestCase {
    name: "ArithmeticTest",
    hooks: Hooks::NONE,
    tests: &[suitcase::test!(adds_up), suitcase::test!(parses)],
};

suitcase::test_suite! {
    pub struct ArithmeticSuite: "Arithmetic Test Suite" {
        ArithmeticTest,
    }
}

suitcase::test_main! {
    suites: [ArithmeticSuite],
    cases: [ARITHMETIC_TEST],
}
```

Members are resolved against the registered test cases before anything is
run. Executors may run several members at once, but results are always
reported in the declared order.
!*/

#![doc(html_root_url = "https://docs.rs/suitcase/0.1.0-dev")]
#![deny(missing_docs)]
#![forbid(clippy::unimplemented, clippy::todo)]

#[macro_use]
mod macros;
mod catalog;
mod cli;
mod error;
mod executor;
mod filter;
mod outcome;
pub mod reporter;
mod runner;
mod session;
mod suite;
mod termination;
mod test_case;

pub use crate::{
    catalog::Catalog,
    cli::{Args, ColorConfig, ExitStatus},
    error::{ExecutorFault, SuiteError},
    executor::{DefaultTestExecutor, TestExecutor},
    filter::{RunIgnored, TestFilter},
    outcome::{CaseOutcome, MemberError, SuiteResult, TestOutcome, TestReport},
    runner::{run, run_with},
    session::{test_main, test_main_with},
    suite::{SuiteDescriptor, SuiteRegistry},
    termination::Termination,
    test_case::{Hooks, Test, TestCase, TestCaseId, TestFn},
};

hidden_item! {
    /// Re-exported items for test!(), test_suite!() and test_main!()
    pub mod _test_reexports {
        pub use crate::{termination::Termination, test_case::Test};
        pub use anyhow::Result;
        pub use std::{
            option::Option::{None, Some},
            stringify,
        };
    }
}
