//! Abstraction of test case execution.

use crate::{
    error::ExecutorFault,
    filter::TestFilter,
    outcome::{CaseOutcome, TestOutcome},
    test_case::{TestCase, TestFn},
};
use futures::{
    executor::ThreadPool,
    future::{self, BoxFuture, Future, FutureExt as _},
    task::SpawnExt as _,
};
use maybe_unwind::maybe_unwind;
use std::{io, sync::Arc};

/// The engine that runs test cases.
pub trait TestExecutor {
    /// Future for awaiting the outcome of a test case.
    type Handle: Future<Output = Result<CaseOutcome, ExecutorFault>>;

    /// Start executing the specified test case.
    ///
    /// A returned error means the executor itself broke down; failing tests
    /// are reported through the [`CaseOutcome`].
    fn execute(&mut self, case: &'static TestCase) -> Self::Handle;
}

impl<T: ?Sized> TestExecutor for &mut T
where
    T: TestExecutor,
{
    type Handle = T::Handle;

    #[inline]
    fn execute(&mut self, case: &'static TestCase) -> Self::Handle {
        (**self).execute(case)
    }
}

impl<T: ?Sized> TestExecutor for Box<T>
where
    T: TestExecutor,
{
    type Handle = T::Handle;

    #[inline]
    fn execute(&mut self, case: &'static TestCase) -> Self::Handle {
        (**self).execute(case)
    }
}

/// The executor used by [`test_main`](crate::test_main).
///
/// Test cases are run on a thread pool. Panics raised by tests or hooks are
/// captured and reported as test failures.
pub struct DefaultTestExecutor {
    pool: ThreadPool,
    filter: Arc<TestFilter>,
}

impl DefaultTestExecutor {
    /// Create an executor running up to `jobs` test cases at the same time.
    pub fn new(jobs: usize, filter: TestFilter) -> io::Result<Self> {
        let pool = ThreadPool::builder()
            .pool_size(jobs.max(1))
            .name_prefix("suitcase-")
            .create()?;
        Ok(Self {
            pool,
            filter: Arc::new(filter),
        })
    }
}

impl TestExecutor for DefaultTestExecutor {
    type Handle = BoxFuture<'static, Result<CaseOutcome, ExecutorFault>>;

    fn execute(&mut self, case: &'static TestCase) -> Self::Handle {
        let filter = self.filter.clone();
        match self
            .pool
            .spawn_with_handle(async move { run_case(case, &filter) })
        {
            Ok(handle) => handle.map(Ok).boxed(),
            Err(err) => future::ready(Err(ExecutorFault::with_source(
                format!("failed to spawn test case '{}'", case.name),
                err,
            )))
            .boxed(),
        }
    }
}

enum Plan {
    Run,
    Skip(TestOutcome),
}

pub(crate) fn run_case(case: &'static TestCase, filter: &TestFilter) -> CaseOutcome {
    let plans: Vec<Plan> = case
        .tests
        .iter()
        .map(|test| {
            if filter.is_filtered_out(&case.qualified_name(test)) {
                Plan::Skip(TestOutcome::FilteredOut)
            } else if !filter.runs(test.ignored) {
                if test.ignored {
                    Plan::Skip(TestOutcome::Ignored(test.ignore_reason))
                } else {
                    // --ignored
                    Plan::Skip(TestOutcome::FilteredOut)
                }
            } else {
                Plan::Run
            }
        })
        .collect();

    let mut outcome = CaseOutcome::passed();
    if !plans.iter().any(|plan| matches!(plan, Plan::Run)) {
        for (test, plan) in case.tests.iter().zip(plans) {
            if let Plan::Skip(o) = plan {
                outcome.push(test.name, o);
            }
        }
        return outcome;
    }

    let setup = match case.hooks.before_all {
        Some(hook) => invoke(hook).map_err(|msg| format!("before_all failed: {}", msg)),
        None => Ok(()),
    };

    for (test, plan) in case.tests.iter().zip(plans) {
        let result = match plan {
            Plan::Skip(o) => o,
            Plan::Run => match setup {
                Err(ref msg) => TestOutcome::Failed(msg.clone()),
                Ok(()) => {
                    log::trace!("running {}", case.qualified_name(test));
                    match run_test(case, test.run) {
                        Ok(()) => TestOutcome::Passed,
                        Err(msg) => TestOutcome::Failed(msg),
                    }
                }
            },
        };
        outcome.push(test.name, result);
    }

    if setup.is_ok() {
        if let Some(hook) = case.hooks.after_all {
            if let Err(msg) = invoke(hook) {
                outcome.set_fixture_failure(format!("after_all failed: {}", msg));
            }
        }
    }

    outcome
}

fn run_test(case: &TestCase, f: TestFn) -> Result<(), String> {
    let before = match case.hooks.before_each {
        Some(hook) => invoke(hook).map_err(|msg| format!("before_each failed: {}", msg)),
        None => Ok(()),
    };
    let body = before.and_then(|()| invoke(f));
    let after = match case.hooks.after_each {
        Some(hook) => invoke(hook).map_err(|msg| format!("after_each failed: {}", msg)),
        None => Ok(()),
    };
    body.and(after)
}

fn invoke(f: TestFn) -> Result<(), String> {
    match maybe_unwind(f) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(format!("{:#}", err)),
        Err(unwind) => Err(unwind.to_string()),
    }
}
