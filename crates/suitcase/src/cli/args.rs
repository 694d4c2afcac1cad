use super::ExitStatus;
use crate::filter::{RunIgnored, TestFilter};
use getopts::Options;
use std::{env, path::Path, path::PathBuf, str::FromStr};

/// Command line arguments.
#[derive(Debug)]
pub struct Args {
    /// List the suites and their tests instead of running them.
    pub list: bool,
    /// Selection of the tests to run.
    pub filter: TestFilter,
    /// Coloring of the console output.
    pub color: ColorConfig,
    /// Print one line per test case instead of one per test.
    pub quiet: bool,
    /// Maximum number of test cases running at the same time.
    pub test_threads: usize,
    /// Where to write the per-test log, if anywhere.
    pub logfile: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments.
    pub fn from_env() -> Result<Self, ExitStatus> {
        let args: Vec<_> = env::args().collect();
        let parser = Parser::new(&args[..]);
        match parser.parse() {
            Ok(Some(args)) => Ok(args),
            Ok(None) => {
                parser.print_usage();
                Err(ExitStatus::OK)
            }
            Err(err) => {
                eprintln!("CLI argument error: {}", err);
                Err(ExitStatus::FAILED)
            }
        }
    }

    /// Parse the specified arguments. The first item is the program name.
    ///
    /// Returns `Ok(None)` when the help message was requested.
    pub fn parse_from(args: &[String]) -> Result<Option<Self>, Box<dyn std::error::Error>> {
        Parser::new(args).parse()
    }
}

/// The color configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum ColorConfig {
    /// Colorize if the output is a terminal.
    Auto,
    /// Always colorize.
    Always,
    /// Never colorize.
    Never,
}

impl FromStr for ColorConfig {
    type Err = Box<dyn std::error::Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorConfig::Auto),
            "always" => Ok(ColorConfig::Always),
            "never" => Ok(ColorConfig::Never),
            v => Err(format!(
                "argument for --color must be auto, always, or never (was {})",
                v
            )
            .into()),
        }
    }
}

struct Parser<'a> {
    args: &'a [String],
    opts: Options,
}

impl<'a> Parser<'a> {
    fn new(args: &'a [String]) -> Self {
        let mut opts = Options::new();
        opts.optflag("h", "help", "Display this message");
        opts.optflag("", "list", "List all suites, their members and tests");
        opts.optflag(
            "",
            "exact",
            "Exactly match filters rather than by substring",
        );
        opts.optflag("", "ignored", "Run only ignored tests");
        opts.optflag("", "include-ignored", "Run ignored and not ignored tests");
        opts.optflag("q", "quiet", "Display one line per test case");
        opts.optopt(
            "",
            "color",
            "Configure coloring of output:
                auto   = colorize if stdout is a tty (default);
                always = always colorize output;
                never  = never colorize output;",
            "auto|always|never",
        );
        opts.optmulti(
            "",
            "skip",
            "Skip tests whose names contain FILTER (this flag can be used multiple times)",
            "FILTER",
        );
        opts.optopt(
            "",
            "test-threads",
            "Number of test cases executed at the same time (default: $RUST_TEST_THREADS or 1)",
            "n_threads",
        );
        opts.optopt(
            "",
            "logfile",
            "Write one line per test result to the specified file",
            "PATH",
        );

        // The following options and flags are reserved for keeping the compatibility with
        // the built-in test harness.
        opts.optflag("", "test", "");
        opts.optflag("", "bench", "");
        opts.optflag("", "nocapture", "");
        opts.optopt("", "format", "", "");
        opts.optopt("Z", "", "", "unstable-options");

        Self { args, opts }
    }

    fn print_usage(&self) {
        let binary = self.args.get(0).map_or("suitcase", String::as_str);
        let progname = Path::new(binary)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(binary);

        let message = format!("Usage: {} [OPTIONS] [FILTER]", progname);
        eprintln!(
            r#"{usage}
The FILTER string is tested against the name of all tests, in the form
`<test case>::<test>`, and only those tests whose names contain the filter
are run."#,
            usage = self.opts.usage(&message)
        );
    }

    fn parse(&self) -> Result<Option<Args>, Box<dyn std::error::Error>> {
        let args = self.args;

        let matches = self.opts.parse(args.get(1..).unwrap_or(args))?;
        if matches.opt_present("h") {
            return Ok(None);
        }

        let run_ignored = match (
            matches.opt_present("ignored"),
            matches.opt_present("include-ignored"),
        ) {
            (_, true) => RunIgnored::Yes,
            (true, false) => RunIgnored::Only,
            (false, false) => RunIgnored::No,
        };

        let filter = TestFilter {
            pattern: matches.free.get(0).cloned(),
            exact: matches.opt_present("exact"),
            skip_patterns: matches.opt_strs("skip"),
            run_ignored,
        };

        let test_threads = match matches.opt_get::<usize>("test-threads")? {
            Some(n) => n,
            None => match env::var("RUST_TEST_THREADS") {
                Ok(value) => value.parse().map_err(|err| {
                    format!("RUST_TEST_THREADS is invalid (was {}): {}", value, err)
                })?,
                Err(..) => 1,
            },
        };
        if test_threads == 0 {
            return Err("argument for --test-threads must not be 0".into());
        }

        Ok(Some(Args {
            list: matches.opt_present("list"),
            filter,
            color: matches.opt_get("color")?.unwrap_or(ColorConfig::Auto),
            quiet: matches.opt_present("q"),
            test_threads,
            logfile: matches.opt_str("logfile").map(PathBuf::from),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Option<Args>, Box<dyn std::error::Error>> {
        let args: Vec<String> = std::iter::once("suite")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        Args::parse_from(&args)
    }

    #[test]
    fn defaults() {
        let args = parse(&["--test-threads", "1"]).unwrap().unwrap();
        assert!(!args.list);
        assert!(!args.quiet);
        assert_eq!(args.color, ColorConfig::Auto);
        assert_eq!(args.filter.pattern, None);
        assert_eq!(args.filter.run_ignored, RunIgnored::No);
        assert_eq!(args.logfile, None);
    }

    #[test]
    fn filters_and_flags() {
        let args = parse(&[
            "--exact",
            "--skip",
            "slow",
            "--skip",
            "flaky",
            "--color",
            "never",
            "--ignored",
            "--test-threads",
            "4",
            "--logfile",
            "out.log",
            "ProductStockTest::reorder",
        ])
        .unwrap()
        .unwrap();
        assert!(args.filter.exact);
        assert_eq!(args.filter.skip_patterns, vec!["slow", "flaky"]);
        assert_eq!(
            args.filter.pattern.as_deref(),
            Some("ProductStockTest::reorder")
        );
        assert_eq!(args.filter.run_ignored, RunIgnored::Only);
        assert_eq!(args.color, ColorConfig::Never);
        assert_eq!(args.test_threads, 4);
        assert_eq!(args.logfile, Some(PathBuf::from("out.log")));
    }

    #[test]
    fn include_ignored_wins() {
        let args = parse(&["--ignored", "--include-ignored", "--test-threads", "1"])
            .unwrap()
            .unwrap();
        assert_eq!(args.filter.run_ignored, RunIgnored::Yes);
    }

    #[test]
    fn help_returns_none() {
        assert!(parse(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn invalid_color() {
        assert!(parse(&["--color", "sometimes"]).is_err());
    }

    #[test]
    fn zero_threads() {
        assert!(parse(&["--test-threads", "0"]).is_err());
    }

    #[test]
    fn reserved_flags_are_accepted() {
        assert!(parse(&["--nocapture", "--format", "pretty", "--test-threads", "1"])
            .unwrap()
            .is_some());
    }
}
