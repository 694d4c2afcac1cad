use crate::{
    catalog::Catalog,
    cli::{Args, ExitStatus},
    executor::DefaultTestExecutor,
    reporter::{plural_suffix, ConsoleReporter, LogReporter, LogfileReporter, Reporter},
    runner::run_with,
    suite::SuiteRegistry,
    test_case::TestCase,
};
use std::{
    error::Error as _,
    io::{self, Write},
    panic,
    sync::Once,
};

/// The entry point of a test binary built with `harness = false`.
///
/// Parses the command line, then runs every suite in order. Returns the exit
/// status the process should terminate with.
pub fn test_main(suites: &[&dyn SuiteRegistry], cases: &[&'static TestCase]) -> ExitStatus {
    static SET_HOOK: Once = Once::new();
    SET_HOOK.call_once(install_panic_hook);

    let args = match Args::from_env() {
        Ok(args) => args,
        Err(st) => return st,
    };

    test_main_with(&args, suites, cases)
}

/// Panics raised inside tests and hooks are captured instead of printed.
/// Other panics go to the previous hook.
fn install_panic_hook() {
    let prev = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if !maybe_unwind::capture_panic_info(info) {
            prev(info);
        }
    }));
}

/// Same as [`test_main`], with already parsed arguments.
pub fn test_main_with(
    args: &Args,
    suites: &[&dyn SuiteRegistry],
    cases: &[&'static TestCase],
) -> ExitStatus {
    let session = match Session::new(args, cases) {
        Ok(session) => session,
        Err(st) => return st,
    };

    if args.list {
        let stdout = io::stdout();
        return match session.print_list(&mut stdout.lock(), suites) {
            Ok(()) => ExitStatus::OK,
            Err(err) => {
                eprintln!("error: {}", err);
                ExitStatus::FAILED
            }
        };
    }

    session.run(suites)
}

struct Session<'a> {
    args: &'a Args,
    catalog: Catalog,
    reporter: Vec<Box<dyn Reporter>>,
}

impl<'a> Session<'a> {
    fn new(args: &'a Args, cases: &[&'static TestCase]) -> Result<Self, ExitStatus> {
        let mut catalog = Catalog::new();
        for &case in cases {
            if let Err(err) = catalog.add(case) {
                eprintln!("registry error: {}", err);
                return Err(ExitStatus::FAILED);
            }
        }

        let mut reporter: Vec<Box<dyn Reporter>> = vec![
            Box::new(ConsoleReporter::new(args.color, args.quiet)),
            Box::new(LogReporter::new()),
        ];
        if let Some(ref path) = args.logfile {
            match LogfileReporter::create(path) {
                Ok(logfile) => reporter.push(Box::new(logfile)),
                Err(err) => {
                    eprintln!("failed to open the logfile {}: {}", path.display(), err);
                    return Err(ExitStatus::FAILED);
                }
            }
        }

        Ok(Self {
            args,
            catalog,
            reporter,
        })
    }

    fn run(&self, suites: &[&dyn SuiteRegistry]) -> ExitStatus {
        let mut executor =
            match DefaultTestExecutor::new(self.args.test_threads, self.args.filter.clone()) {
                Ok(executor) => executor,
                Err(err) => {
                    eprintln!("failed to start the test executor: {}", err);
                    return ExitStatus::FAILED;
                }
            };

        let mut status = ExitStatus::OK;
        for suite in suites {
            let desc = suite.describe();
            match run_with(
                &desc,
                &self.catalog,
                &mut executor,
                &self.reporter,
                self.args.test_threads,
            ) {
                Ok(result) if result.is_passed() => (),
                Ok(..) => status = ExitStatus::FAILED,
                Err(err) => {
                    eprintln!("error: {}", err);
                    let mut source = err.source();
                    while let Some(cause) = source {
                        eprintln!("caused by: {}", cause);
                        source = cause.source();
                    }
                    return ExitStatus::FAILED;
                }
            }
        }

        status
    }

    fn print_list<W: ?Sized>(
        &self,
        w: &mut W,
        suites: &[&dyn SuiteRegistry],
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        W: Write,
    {
        let mut num_tests = 0;

        for suite in suites {
            let desc = suite.describe();
            desc.validate()?;
            writeln!(w, "{}: suite", desc.display_name())?;
            for member in desc.members() {
                let case = self.catalog.resolve(member)?;
                for test in case.tests {
                    let name = case.qualified_name(test);
                    if self.args.filter.is_filtered_out(&name) {
                        continue;
                    }
                    writeln!(w, "{}: test", name)?;
                    num_tests += 1;
                }
            }
        }

        if num_tests != 0 {
            writeln!(w)?;
        }
        writeln!(
            w,
            "{} test{}, {} test case{}",
            num_tests,
            plural_suffix(num_tests),
            self.catalog.len(),
            plural_suffix(self.catalog.len()),
        )?;

        Ok(())
    }
}
