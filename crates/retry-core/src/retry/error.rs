//! Failure of a single command attempt.

use std::ffi::OsString;
use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Why one execution of the command failed. Every variant is retried by
/// default; the distinction only matters for the final exit code.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// The process could not be started (not found, permission denied, ...).
    #[error("failed to start {program:?}: {source}")]
    Spawn {
        program: OsString,
        #[source]
        source: io::Error,
    },
    /// The process started but its output could not be read or it could not
    /// be waited on.
    #[error("failed to wait for child: {source}")]
    Wait {
        #[source]
        source: io::Error,
    },
    /// The process ran to completion with a non-success status.
    #[error("{status}")]
    Exited { status: ExitStatus },
}
