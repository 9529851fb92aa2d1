//! Failure report formatting.

use crate::cli::report::{write_error, write_output};
use retry_core::retry::{Exhausted, StopReason};

fn exhausted(output: &[u8]) -> Exhausted<String> {
    Exhausted {
        attempts: 3,
        reason: StopReason::BudgetExhausted,
        last_error: "exit status: 1".to_string(),
        last_output: output.to_vec(),
    }
}

#[test]
fn report_splits_error_and_output_streams() {
    let e = exhausted(b"boom\n");
    let mut err = Vec::new();
    let mut out = Vec::new();
    write_error(&e, &mut err).unwrap();
    write_output(&e, &mut out).unwrap();
    assert_eq!(String::from_utf8(err).unwrap(), "operation failed: exit status: 1\n");
    assert_eq!(String::from_utf8(out).unwrap(), "\nlast stdout/stderr output:\nboom\n\n");
}

#[test]
fn report_with_empty_output_still_labels_it() {
    let mut out = Vec::new();
    write_output(&exhausted(b""), &mut out).unwrap();
    assert_eq!(out, b"\nlast stdout/stderr output:\n\n");
}

#[test]
fn report_passes_non_utf8_bytes_through() {
    let mut out = Vec::new();
    write_output(&exhausted(&[0xff, 0xfe]), &mut out).unwrap();
    assert!(out.windows(2).any(|w| w == [0xff, 0xfe]));
}
