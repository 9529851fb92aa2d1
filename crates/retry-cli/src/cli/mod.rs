//! CLI for retry: parse flags, run the command under backoff, report.

mod args;
mod report;

use std::ffi::OsString;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use retry_core::command::CommandOperation;
use retry_core::config::{
    BackoffConfig, DEFAULT_INITIAL_INTERVAL_SECS, DEFAULT_MAX_ELAPSED_TIME_SECS,
    DEFAULT_MAX_INTERVAL_SECS,
};
use retry_core::exit_code::{platform_extractor, resolve_exit_code, DecodeError, ExitCodeExtractor};
use retry_core::retry::{ExponentialBackoff, Outcome, RetryDriver};

use args::normalize_legacy_flags;

/// Exit status for usage errors (bad flags, no command).
pub const EXIT_USAGE: i32 = 1;

/// Re-run a command with exponential backoff until it exits 0.
#[derive(Debug, Parser)]
#[command(name = "retry", version)]
#[command(about = "Re-run a command with exponential backoff until it succeeds", long_about = None)]
pub struct Cli {
    /// Delay before the first retry, in seconds.
    #[arg(
        long,
        alias = "initialInterval",
        value_name = "SECS",
        default_value_t = DEFAULT_INITIAL_INTERVAL_SECS
    )]
    pub initial_interval: u64,

    /// Cap on any single retry delay, in seconds.
    #[arg(
        long,
        alias = "maxInterval",
        value_name = "SECS",
        default_value_t = DEFAULT_MAX_INTERVAL_SECS
    )]
    pub max_interval: u64,

    /// Give up once retrying would run past this many seconds. 0 never gives up.
    #[arg(
        long,
        alias = "maxElapsedTime",
        value_name = "SECS",
        default_value_t = DEFAULT_MAX_ELAPSED_TIME_SECS
    )]
    pub max_elapsed_time: u64,

    /// Command to run, followed by its arguments (no shell interpretation).
    #[arg(required = true, trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<OsString>,
}

impl Cli {
    pub fn backoff_config(&self) -> BackoffConfig {
        BackoffConfig::from_secs(self.initial_interval, self.max_interval, self.max_elapsed_time)
    }

    /// Run the command to completion and return this process's exit code.
    ///
    /// `extractor` decodes the last child status; an undecodable status
    /// aborts the process after the error summary and before the output dump.
    pub fn run(self, extractor: &dyn ExitCodeExtractor) -> Result<i32> {
        let cfg = self.backoff_config();
        tracing::debug!(?cfg, command = ?self.command, "starting");

        let op = CommandOperation::from_argv(self.command).context("no command given")?;
        let mut driver = RetryDriver::new(ExponentialBackoff::new(cfg));

        match driver.run(|| op.run_once()) {
            Outcome::Success { attempts } => {
                tracing::debug!(attempts, "command succeeded");
                Ok(0)
            }
            Outcome::Exhausted(exhausted) => {
                report::write_error(&exhausted, &mut io::stderr().lock())
                    .context("write failure summary")?;
                let code = match resolve_exit_code(&exhausted, extractor) {
                    Ok(code) => code,
                    Err(err) => abort_undecodable(err),
                };
                report::write_output(&exhausted, &mut io::stdout().lock())
                    .context("write last output")?;
                Ok(code)
            }
        }
    }
}

/// Parse `std::env::args_os` and run. Help and version exit 0 inside clap;
/// other parse errors print usage to stderr and yield [`EXIT_USAGE`].
pub fn run_from_args() -> Result<i32> {
    let args = normalize_legacy_flags(std::env::args_os());
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            err.print().context("print usage")?;
            return Ok(EXIT_USAGE);
        }
        Err(err) => err.exit(),
    };
    cli.run(platform_extractor().as_ref())
}

/// The child status carries no exit code we know how to report: hard stop.
fn abort_undecodable(err: DecodeError) -> ! {
    tracing::error!(error = %err, "unsupported exit status");
    eprintln!("retry: fatal: {err}");
    std::process::abort()
}

#[cfg(test)]
mod tests;
