/*!

`agent-utils` is a collection of functions that may be used by deployer implementations.
It provides the external process runner that deployers use to drive cloud management tools, and
logging helpers shared by the deployer binaries.

!*/

use constants::DEFAULT_AGENT_LEVEL_FILTER;
use env_logger::Builder;
pub use error::Error;
use log::{trace, LevelFilter};
use snafu::{ensure, ResultExt};
use std::env;
use std::process::Stdio;
use tokio::process::Command;

pub mod constants;
mod error;

/// Extract the value of `RUST_LOG` if it exists, otherwise log this application at
/// `DEFAULT_AGENT_LEVEL_FILTER`.
pub fn init_agent_logger(bin_crate: &str, log_level: Option<LevelFilter>) {
    match env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            let log_level = log_level.unwrap_or(DEFAULT_AGENT_LEVEL_FILTER);
            Builder::new()
                // Set log level to Error for crates other than our own.
                .filter_level(LevelFilter::Error)
                // Set all of our crates to the desired level.
                .filter(Some(bin_crate), log_level)
                .filter(Some("agent_utils"), log_level)
                .filter(Some("aks_deployer"), log_level)
                .filter(Some("deployer"), log_level)
                .init();
        }
    }
}

/// Implement `Display` using `serde_json` `to_string_pretty` for types that implement Serialize.
#[macro_export]
macro_rules! impl_display_as_json {
    ($i:ident) => {
        impl std::fmt::Display for $i {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = serde_json::to_string_pretty(self)
                    .unwrap_or_else(|e| format!("Serialization failed: {}", e));
                std::fmt::Display::fmt(&s, f)
            }
        }
    };
}

/// Runs `command` to completion and returns its `stdout`. Both output streams are fully buffered
/// and `stdin` is closed. If the command cannot be started, or exits with a non-zero status, the
/// returned error carries the captured `stderr` text followed by the cause.
pub async fn run_with_error_output(command: &mut Command) -> error::Result<Vec<u8>> {
    let hint = command_hint(command);
    trace!("Running '{}'", hint);
    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .context(error::CommandSpawnSnafu {
            command: hint.clone(),
        })?;
    trace!("'{}' exited with {}", hint, output.status);
    ensure!(
        output.status.success(),
        error::CommandFailedSnafu {
            command: hint,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    );
    Ok(output.stdout)
}

/// Renders a command as `program arg1 arg2 ...` for log and error messages.
fn command_hint(command: &Command) -> String {
    let command = command.as_std();
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
