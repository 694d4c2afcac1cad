use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use suitcase::{
    reporter::LogReporter, run, run_with, Args, Catalog, DefaultTestExecutor, Hooks, SuiteError,
    SuiteRegistry, TestCase, TestFilter, TestOutcome,
};

static SETUPS: AtomicUsize = AtomicUsize::new(0);

fn count_setup() -> anyhow::Result<()> {
    SETUPS.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

mod arithmetic {
    pub fn adds_up() {
        assert_eq!(1 + 1, 2);
    }

    pub fn parses() -> anyhow::Result<()> {
        let n: u32 = "42".parse()?;
        anyhow::ensure!(n == 42, "unexpected value: {}", n);
        Ok(())
    }

    pub fn overflows() -> Result<(), std::num::ParseIntError> {
        let _: u8 = "256".parse()?;
        Ok(())
    }

    pub fn unfinished() {
        unreachable!("ignored tests are not run by default");
    }
}

static ARITHMETIC_TEST: TestCase = TestCase {
    name: "ArithmeticTest",
    hooks: Hooks {
        before_each: Some(count_setup),
        ..Hooks::NONE
    },
    tests: &[
        suitcase::test!(arithmetic::adds_up),
        suitcase::test!(arithmetic::parses),
        suitcase::test!(#[ignore = "waiting for bignum"] arithmetic::unfinished),
    ],
};

static BROKEN_TEST: TestCase = TestCase {
    name: "BrokenTest",
    hooks: Hooks::NONE,
    tests: &[suitcase::test!(arithmetic::overflows)],
};

suitcase::test_suite! {
    /// Only arithmetic.
    struct ArithmeticSuite: "Arithmetic Test Suite" {
        ArithmeticTest,
    }
}

suitcase::test_suite! {
    struct EverythingSuite: "Everything" {
        BrokenTest,
        ArithmeticTest,
    }
}

suitcase::test_suite! {
    struct MisspelledSuite: "Misspelled" {
        "ArithmeticTest",
        "ArithmeticTests",
    }
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.add(&ARITHMETIC_TEST).unwrap();
    catalog.add(&BROKEN_TEST).unwrap();
    catalog
}

fn executor() -> DefaultTestExecutor {
    DefaultTestExecutor::new(2, TestFilter::default()).unwrap()
}

#[test]
fn declared_suite_describes_its_members() {
    let desc = EverythingSuite.describe();
    assert_eq!(desc.display_name(), "Everything");
    let members: Vec<_> = desc.members().iter().map(|m| m.as_str()).collect();
    assert_eq!(members, vec!["BrokenTest", "ArithmeticTest"]);
}

#[test]
fn test_names_follow_the_declared_path() {
    let names: Vec<_> = ARITHMETIC_TEST.tests.iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        vec![
            "arithmetic::adds_up",
            "arithmetic::parses",
            "arithmetic::unfinished"
        ]
    );
    assert_eq!(ARITHMETIC_TEST.tests[2].ignore_reason, Some("waiting for bignum"));
}

#[test]
fn passing_suite() {
    let before = SETUPS.load(Ordering::SeqCst);
    let result = run(&ArithmeticSuite.describe(), &catalog(), executor()).unwrap();
    assert_eq!(result.passed, 1);
    assert_eq!(result.failed, 0);
    assert!(result.errors.is_empty());

    let (_, outcome) = &result.cases[0];
    assert_eq!(outcome.count(|o| *o == TestOutcome::Passed), 2);
    assert_eq!(
        outcome.tests()[2].outcome,
        TestOutcome::Ignored(Some("waiting for bignum"))
    );
    assert!(SETUPS.load(Ordering::SeqCst) >= before + 2);
}

#[test]
fn failing_member_is_recorded_and_the_run_continues() {
    let result = run_with(
        &EverythingSuite.describe(),
        &catalog(),
        executor(),
        &LogReporter::new(),
        2,
    )
    .unwrap();
    assert_eq!(result.passed, 1);
    assert_eq!(result.failed, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].member.as_str(), "BrokenTest");
    assert_eq!(result.cases[1].0.as_str(), "ArithmeticTest");
}

#[test]
fn misspelled_member_is_a_setup_error() {
    let err = run(&MisspelledSuite.describe(), &catalog(), executor()).unwrap_err();
    match err {
        SuiteError::MemberNotFound(id) => assert_eq!(id.as_str(), "ArithmeticTests"),
        err => panic!("unexpected error: {}", err),
    }
}

fn args(extra: &[&str]) -> Args {
    let args: Vec<String> = ["suite", "--color", "never", "--test-threads", "1"]
        .iter()
        .chain(extra)
        .map(|s| s.to_string())
        .collect();
    Args::parse_from(&args).unwrap().unwrap()
}

#[test]
fn main_reports_success() {
    let status = suitcase::test_main_with(
        &args(&[]),
        &[&ArithmeticSuite],
        &[&ARITHMETIC_TEST, &BROKEN_TEST],
    );
    assert!(status.success());
}

#[test]
fn main_reports_failure() {
    let status = suitcase::test_main_with(
        &args(&["-q"]),
        &[&ArithmeticSuite, &EverythingSuite],
        &[&ARITHMETIC_TEST, &BROKEN_TEST],
    );
    assert_eq!(status.code(), 101);
}

#[test]
fn main_filters_out_the_failing_test() {
    let status = suitcase::test_main_with(
        &args(&["--skip", "overflows"]),
        &[&EverythingSuite],
        &[&ARITHMETIC_TEST, &BROKEN_TEST],
    );
    assert!(status.success());
}

#[test]
fn main_rejects_unknown_members() {
    let status = suitcase::test_main_with(&args(&[]), &[&MisspelledSuite], &[&ARITHMETIC_TEST]);
    assert!(!status.success());
}

#[test]
fn main_rejects_conflicting_cases() {
    let status = suitcase::test_main_with(
        &args(&["--list"]),
        &[&ArithmeticSuite],
        &[&ARITHMETIC_TEST, &ARITHMETIC_TEST],
    );
    assert!(!status.success());
}

#[test]
fn main_writes_the_logfile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suite.log");
    let status = suitcase::test_main_with(
        &args(&["-q", "--logfile", path.to_str().unwrap()]),
        &[&EverythingSuite],
        &[&ARITHMETIC_TEST, &BROKEN_TEST],
    );
    assert_eq!(status.code(), 101);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "failed BrokenTest::arithmetic::overflows\n\
         ok ArithmeticTest::arithmetic::adds_up\n\
         ok ArithmeticTest::arithmetic::parses\n\
         ignored ArithmeticTest::arithmetic::unfinished\n"
    );
}

#[test]
fn main_lists_tests() {
    let status = suitcase::test_main_with(
        &args(&["--list"]),
        &[&EverythingSuite],
        &[&ARITHMETIC_TEST, &BROKEN_TEST],
    );
    assert!(status.success());
}
