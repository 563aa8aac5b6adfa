//! Writing output records.

use anyhow::{Context, Result};
use std::fmt::Display;
use std::io::Write;

/// Emitter handed to map and reduce functions; writes `KEY<delim>VALUE\n`
/// for every emitted pair and nothing else.
pub struct Emitter<'a> {
    out: &'a mut dyn Write,
    delimiter: char,
    emitted: u64,
}

impl<'a> Emitter<'a> {
    pub fn new(out: &'a mut dyn Write, delimiter: char) -> Self {
        Self {
            out,
            delimiter,
            emitted: 0,
        }
    }

    /// Writes one record. The write is not buffered beyond whatever
    /// buffering the underlying writer does.
    pub fn emit<K: Display, V: Display>(&mut self, key: K, value: V) -> Result<()> {
        writeln!(self.out, "{}{}{}", key, self.delimiter, value)
            .context("failed to write output record")?;
        self.emitted += 1;
        Ok(())
    }

    /// Number of records emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush output")
    }
}
