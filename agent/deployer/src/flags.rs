/*!

The flags that every deployer's command line carries, regardless of which deployer it is. A
deployer's construction entry point merges these into its own flag set.

!*/

use clap::{Arg, ArgMatches};
use log::LevelFilter;
use std::str::FromStr;

const BUILD_ARG: &str = "build";
const UP_ARG: &str = "up";
const DOWN_ARG: &str = "down";
pub const LOG_LEVEL_ARG: &str = "log-level";

/// The harness's global flags.
pub fn harness_args() -> Vec<Arg<'static>> {
    vec![
        Arg::new(BUILD_ARG)
            .long(BUILD_ARG)
            .help("Build kubernetes before bringing the cluster up"),
        Arg::new(UP_ARG)
            .long(UP_ARG)
            .help("Provision a test cluster"),
        Arg::new(DOWN_ARG)
            .long(DOWN_ARG)
            .help("Tear down the test cluster; with --up, any existing cluster is removed first"),
        Arg::new(LOG_LEVEL_ARG)
            .long(LOG_LEVEL_ARG)
            .takes_value(true)
            .default_value("info")
            .possible_values(["trace", "debug", "info", "warn", "error"])
            .help(
                "Set logging verbosity. If the environment variable `RUST_LOG` is present, it \
                 overrides the default logging behavior. See https://docs.rs/env_logger/latest",
            ),
    ]
}

/// The lifecycle phases that the harness was asked to run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Verbs {
    pub build: bool,
    pub up: bool,
    pub down: bool,
}

impl Verbs {
    pub fn from_arg_matches(matches: &ArgMatches) -> Self {
        Self {
            build: matches.is_present(BUILD_ARG),
            up: matches.is_present(UP_ARG),
            down: matches.is_present(DOWN_ARG),
        }
    }
}

/// The requested log level, if the matches carry a valid one.
pub fn log_level(matches: &ArgMatches) -> Option<LevelFilter> {
    matches
        .value_of(LOG_LEVEL_ARG)
        .and_then(|level| LevelFilter::from_str(level).ok())
}
