//! Final report for a command that never succeeded.

use std::fmt::Display;
use std::io::{self, Write};

use retry_core::retry::Exhausted;

/// Error summary, for stderr.
pub fn write_error<E, W>(exhausted: &Exhausted<E>, err: &mut W) -> io::Result<()>
where
    E: Display,
    W: Write,
{
    writeln!(err, "operation failed: {}", exhausted.last_error)?;
    err.flush()
}

/// The last attempt's combined output, labelled, for stdout. Bytes are
/// written as-is.
pub fn write_output<E, W: Write>(exhausted: &Exhausted<E>, out: &mut W) -> io::Result<()> {
    write!(out, "\nlast stdout/stderr output:\n")?;
    out.write_all(&exhausted.last_output)?;
    writeln!(out)?;
    out.flush()
}
