//! One execution of the external command, with stdout and stderr captured
//! into a single buffer.

use std::ffi::{OsStr, OsString};
use std::io::{self, Read};
use std::process::{Command, Stdio};

use crate::retry::{AttemptError, AttemptResult};

/// The command being retried: a program and its arguments, passed to the OS
/// verbatim (no shell).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOperation {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandOperation {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a full command line into program and arguments. `None` if empty.
    pub fn from_argv<I, A>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let mut it = argv.into_iter().map(Into::into);
        let program = it.next()?;
        Some(Self {
            program,
            args: it.collect(),
        })
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Spawn the command, collect combined stdout/stderr until EOF, and wait
    /// for it. stdin is `/dev/null`.
    ///
    /// Both streams share one pipe, so their bytes interleave in the order the
    /// child wrote them. The child is always reaped before returning.
    pub fn run_once(&self) -> AttemptResult<AttemptError> {
        let (mut reader, writer) = match io::pipe() {
            Ok(pair) => pair,
            Err(source) => return AttemptResult::failure(Vec::new(), self.spawn_error(source)),
        };

        // The Command holds the parent's copies of the write end; it must be
        // dropped before reading or EOF never arrives.
        let spawned = writer.try_clone().and_then(|stderr| {
            Command::new(&self.program)
                .args(&self.args)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(stderr)
                .spawn()
        });
        let mut child = match spawned {
            Ok(child) => child,
            Err(source) => return AttemptResult::failure(Vec::new(), self.spawn_error(source)),
        };
        tracing::debug!(pid = child.id(), program = ?self.program, "spawned command");

        let mut output = Vec::new();
        if let Err(source) = reader.read_to_end(&mut output) {
            let _ = child.kill();
            let _ = child.wait();
            return AttemptResult::failure(output, AttemptError::Wait { source });
        }

        match child.wait() {
            Ok(status) if status.success() => AttemptResult::success(output),
            Ok(status) => AttemptResult::failure(output, AttemptError::Exited { status }),
            Err(source) => AttemptResult::failure(output, AttemptError::Wait { source }),
        }
    }

    fn spawn_error(&self, source: io::Error) -> AttemptError {
        AttemptError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}
