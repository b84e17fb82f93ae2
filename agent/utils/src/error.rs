use snafu::Snafu;
use std::process::ExitStatus;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to run '{}': {}", command, source))]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },

    // The captured stderr comes first so the cloud tool's own message leads the error chain.
    #[snafu(display("{} : '{}' {}", stderr, command, status))]
    CommandFailed {
        command: String,
        stderr: String,
        status: ExitStatus,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
