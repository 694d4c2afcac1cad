use crate::{
    catalog::Catalog,
    error::SuiteError,
    executor::TestExecutor,
    outcome::SuiteResult,
    reporter::{LogReporter, Reporter},
    suite::SuiteDescriptor,
};
use futures::{executor::block_on, stream, StreamExt as _};

/// Run every member of a suite, one after another, and aggregate the outcomes.
///
/// Events are reported through the `log` facade. See [`run_with`].
pub fn run<E>(
    desc: &SuiteDescriptor,
    catalog: &Catalog,
    executor: E,
) -> Result<SuiteResult, SuiteError>
where
    E: TestExecutor,
{
    run_with(desc, catalog, executor, &LogReporter::new(), 1)
}

/// Run every member of a suite and aggregate the outcomes.
///
/// All members are resolved against `catalog` before anything is executed.
/// Up to `jobs` members are handed to the executor at the same time, but the
/// reporter and the returned [`SuiteResult`] always see the members in the
/// declared order. A failing member does not stop the run; an executor fault
/// does, and is returned as [`SuiteError::Executor`].
pub fn run_with<E, R>(
    desc: &SuiteDescriptor,
    catalog: &Catalog,
    mut executor: E,
    reporter: &R,
    jobs: usize,
) -> Result<SuiteResult, SuiteError>
where
    E: TestExecutor,
    R: Reporter + ?Sized,
{
    desc.validate()?;

    let cases = desc
        .members()
        .iter()
        .map(|member| -> Result<_, SuiteError> {
            let case = catalog.resolve(member)?;
            log::debug!("resolved member {} of '{}'", member, desc.display_name());
            Ok((member, case))
        })
        .collect::<Result<Vec<_>, _>>()?;

    reporter.suite_starting(desc);

    let mut result = SuiteResult::default();
    block_on(async {
        let outcomes = stream::iter(cases.into_iter().map(|(member, case)| {
            reporter.case_starting(member);
            let handle = executor.execute(case);
            async move { (member, handle.await) }
        }))
        .buffered(jobs.max(1));
        futures::pin_mut!(outcomes);

        while let Some((member, res)) = outcomes.next().await {
            let outcome = res.map_err(|fault| SuiteError::Executor {
                member: member.clone(),
                fault,
            })?;
            reporter.case_ended(member, &outcome);
            result.append(member.clone(), outcome);
        }

        Ok::<_, SuiteError>(())
    })?;

    reporter.suite_ended(desc, &result);

    Ok(result)
}
