//! Map the final failed attempt to this program's own exit code.
//!
//! Decoding a child's [`ExitStatus`] is platform specific, so it sits behind
//! [`ExitCodeExtractor`]. A status that an extractor cannot decode yields a
//! [`DecodeError`]; callers must treat that as fatal rather than pick a code.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

use crate::retry::{AttemptError, Exhausted};

/// Exit code used when the command could not be found.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit code used when the command was found but could not be started.
pub const EXIT_CANNOT_EXECUTE: i32 = 126;
/// Exit code used when the child started but could not be waited on.
pub const EXIT_WAIT_FAILED: i32 = 1;

/// The child's exit status has a representation we do not know how to map.
#[derive(Debug, Error)]
#[error("cannot decode child exit status `{status}` on this platform")]
pub struct DecodeError {
    pub status: ExitStatus,
}

/// Turns a child exit status into an exit code for this process.
pub trait ExitCodeExtractor {
    fn exit_code(&self, status: &ExitStatus) -> Result<i32, DecodeError>;
}

/// Unix: normal exits map to their code, signal deaths to `128 + signal`.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixExitCode;

#[cfg(unix)]
impl ExitCodeExtractor for UnixExitCode {
    fn exit_code(&self, status: &ExitStatus) -> Result<i32, DecodeError> {
        use std::os::unix::process::ExitStatusExt;

        if let Some(code) = status.code() {
            return Ok(code);
        }
        match status.signal() {
            Some(sig) => Ok(128 + sig),
            None => Err(DecodeError { status: *status }),
        }
    }
}

/// Any platform: only statuses that carry a plain exit code are decodable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableExitCode;

impl ExitCodeExtractor for PortableExitCode {
    fn exit_code(&self, status: &ExitStatus) -> Result<i32, DecodeError> {
        status.code().ok_or(DecodeError { status: *status })
    }
}

/// The extractor for the target this binary was built for.
#[cfg(unix)]
pub fn platform_extractor() -> Box<dyn ExitCodeExtractor> {
    Box::new(UnixExitCode)
}

/// The extractor for the target this binary was built for.
#[cfg(not(unix))]
pub fn platform_extractor() -> Box<dyn ExitCodeExtractor> {
    Box::new(PortableExitCode)
}

/// Exit code for a loop that ended without success.
///
/// A child that ran and failed propagates its own code through `extractor`.
/// Start failures use the shell conventions (127 not found, 126 otherwise).
pub fn resolve_exit_code(
    exhausted: &Exhausted<AttemptError>,
    extractor: &dyn ExitCodeExtractor,
) -> Result<i32, DecodeError> {
    match &exhausted.last_error {
        AttemptError::Exited { status } => extractor.exit_code(status),
        AttemptError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound => {
            Ok(EXIT_NOT_FOUND)
        }
        AttemptError::Spawn { .. } => Ok(EXIT_CANNOT_EXECUTE),
        AttemptError::Wait { .. } => Ok(EXIT_WAIT_FAILED),
    }
}
