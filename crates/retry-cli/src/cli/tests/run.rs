//! Exit-code paths of `Cli::run` with injected extractors.

use crate::cli::Cli;
use retry_core::exit_code::{DecodeError, ExitCodeExtractor};
use std::ffi::OsString;
use std::process::ExitStatus;

struct FixedCode(i32);

impl ExitCodeExtractor for FixedCode {
    fn exit_code(&self, _status: &ExitStatus) -> Result<i32, DecodeError> {
        Ok(self.0)
    }
}

struct Undecodable;

impl ExitCodeExtractor for Undecodable {
    fn exit_code(&self, status: &ExitStatus) -> Result<i32, DecodeError> {
        Err(DecodeError { status: *status })
    }
}

/// One attempt only: the 1s budget cannot fit the first 1s wait.
fn one_shot(command: &[&str]) -> Cli {
    Cli {
        initial_interval: 1,
        max_interval: 1,
        max_elapsed_time: 1,
        command: command.iter().map(OsString::from).collect(),
    }
}

#[test]
fn success_exits_zero_without_decoding() {
    assert_eq!(one_shot(&["true"]).run(&Undecodable).unwrap(), 0);
}

#[cfg(unix)]
#[test]
fn exhausted_exit_code_comes_from_extractor() {
    assert_eq!(one_shot(&["false"]).run(&FixedCode(42)).unwrap(), 42);
}

#[cfg(unix)]
const ABORT_CHILD_ENV: &str = "RETRY_TEST_ABORT_CHILD";

#[cfg(unix)]
#[test]
fn undecodable_status_aborts_before_output_dump() {
    use std::os::unix::process::ExitStatusExt;
    use std::process::Command;

    if std::env::var_os(ABORT_CHILD_ENV).is_some() {
        let code = one_shot(&["sh", "-c", "echo captured; exit 3"]).run(&Undecodable);
        panic!("run returned instead of aborting: {code:?}");
    }

    // Re-run only this test in a child process, where it must abort.
    let out = Command::new(std::env::current_exe().unwrap())
        .args([
            "cli::tests::run::undecodable_status_aborts_before_output_dump",
            "--exact",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(ABORT_CHILD_ENV, "1")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(out.status.signal(), Some(libc::SIGABRT), "stderr: {stderr}");
    assert!(stderr.contains("operation failed: exit status: 3"), "stderr: {stderr}");
    assert!(stderr.contains("retry: fatal: cannot decode"), "stderr: {stderr}");
    assert!(!stdout.contains("last stdout/stderr output"), "stdout: {stdout}");
    assert!(!stdout.contains("captured"), "stdout: {stdout}");
}
