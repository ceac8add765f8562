//! JSON output for the one-shot commands
//!
//! Results go to stdout as a single JSON document; logs stay on stderr.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a value to stdout as pretty JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    write_json_to(&mut stdout, value)?;
    stdout.flush()?;
    Ok(())
}

/// Write a value as pretty JSON to any writer
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
