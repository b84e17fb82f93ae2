/*!

The `options` module defines the opaque options object that the harness hands to a deployer's
construction entry point.

!*/

use snafu::{ResultExt, Snafu};
use std::env::VarError;
use std::path::{Path, PathBuf};

/// The environment variable holding the harness's run id.
pub const ENV_RUN_ID: &str = "KUBETEST2_RUN_ID";
/// The environment variable holding the harness's run directory.
pub const ENV_RUN_DIR: &str = "KUBETEST2_RUN_DIR";
const DEFAULT_RUN_DIR_ROOT: &str = "_rundir";

/// The public error type for [`Options::from_env`].
#[derive(Debug, Snafu)]
pub struct OptionsError(InnerError);

/// The private error type for [`Options::from_env`].
#[derive(Debug, Snafu)]
pub(crate) enum InnerError {
    #[snafu(display("Unable to determine the current directory: {}", source))]
    CurrentDir { source: std::io::Error },

    #[snafu(display("Unable to read environment variable: '{}': {}", key, source))]
    EnvRead { key: String, source: VarError },
}

/// Information about the harness run that a deployer is taking part in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    run_id: String,
    run_dir: PathBuf,
}

impl Options {
    pub fn new<S, P>(run_id: S, run_dir: P) -> Self
    where
        S: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            run_id: run_id.into(),
            run_dir: run_dir.into(),
        }
    }

    /// Read the options from the environment. A missing run id is replaced with a random one, and
    /// a missing run directory defaults to `_rundir/<run id>` under the current directory.
    pub fn from_env() -> Result<Options, OptionsError> {
        let run_id = env_var(ENV_RUN_ID)?;
        let run_dir = env_var(ENV_RUN_DIR)?;
        let cwd = std::env::current_dir().context(CurrentDirSnafu)?;
        Ok(Self::from_values(run_id, run_dir, &cwd))
    }

    fn from_values(run_id: Option<String>, run_dir: Option<String>, cwd: &Path) -> Self {
        let run_id = run_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let run_dir = match run_dir.filter(|dir| !dir.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => cwd.join(DEFAULT_RUN_DIR_ROOT).join(&run_id),
        };
        Self { run_id, run_dir }
    }

    /// The unique id of this harness run.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// The directory where the harness keeps the artifacts of this run.
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }
}

fn env_var(key: &str) -> Result<Option<String>, OptionsError> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(source) => Err(InnerError::EnvRead {
            key: key.to_string(),
            source,
        }
        .into()),
    }
}
