//! JSONL rendering of check results.
//!
//! Each line is one complete JSON object for one domain check. This is the
//! engine's output contract: downstream notification layers filter on
//! `has_changed && !is_first_check`, or on `discrepancy`, and render from
//! these objects.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::CheckResult;

/// Writes results as JSON Lines, one object per line.
///
/// # Errors
///
/// Fails on serialization or write errors (broken pipes excepted when the
/// writer is wrapped in [`IgnoreBrokenPipe`]).
pub fn write_results_jsonl<W: Write>(writer: &mut W, results: &[CheckResult]) -> Result<usize> {
    let mut count = 0;
    for result in results {
        serde_json::to_writer(&mut *writer, result).context("Failed to serialize check result")?;
        writeln!(writer)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Opens the result sink: a file when a path is given, stdout otherwise.
///
/// Stdout is wrapped so a downstream `head`/`jq` closing the pipe ends the
/// output quietly instead of erroring the run.
///
/// # Errors
///
/// Fails when the output file cannot be created.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(IgnoreBrokenPipe::new(io::stdout()))),
    }
}

/// Writer adapter that swallows `BrokenPipe` errors.
pub struct IgnoreBrokenPipe<W: Write> {
    inner: W,
    broken: bool,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            broken: false,
        }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.broken {
            return Ok(buf.len());
        }
        match self.inner.write(buf) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                self.broken = true;
                Ok(buf.len())
            }
            other => other,
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.broken {
            return Ok(());
        }
        match self.inner.flush() {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                self.broken = true;
                Ok(())
            }
            other => other,
        }
    }
}
