//! Reading records from a byte stream and driving a mapper over them.
//!

use crate::framer::{FramedLines, DEFAULT_CHUNK_SIZE};
use crate::record::Record;
use crate::utils::decode_line;
use crate::DEFAULT_DELIMITER;
use anyhow::{Context, Result};
use std::io::Read;
use tracing::debug;

/// Knobs shared by the mapper and reducer drivers.
#[derive(Clone, Copy, Debug)]
pub struct StreamOptions {
    /// Separates key from value on input lines.
    pub delimiter: char,
    /// Bytes requested from the reader per chunk.
    pub chunk_size: usize,
    /// Replace invalid UTF-8 instead of failing.
    pub lossy: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            chunk_size: DEFAULT_CHUNK_SIZE,
            lossy: false,
        }
    }
}

impl StreamOptions {
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }
}

/// Iterator over the non-blank records of a stream.
pub struct Records<R: Read> {
    lines: FramedLines<R>,
    opts: StreamOptions,
    /// Lines read so far, blank ones included.
    lines_read: u64,
}

impl<R: Read> Records<R> {
    pub fn new(reader: R, opts: StreamOptions) -> Self {
        Self {
            lines: FramedLines::with_chunk_size(reader, opts.chunk_size),
            opts,
            lines_read: 0,
        }
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            self.lines_read += 1;
            let line = match line.context("failed to read input") {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            let line = match decode_line(line, self.opts.lossy) {
                Ok(line) => line,
                Err(e) => return Some(Err(e.context(format!("at line {}", self.lines_read)))),
            };
            if let Some(record) = Record::parse(&line, self.opts.delimiter) {
                return Some(Ok(record));
            }
        }
        None
    }
}

/// Runs `map` once per non-blank input record.
///
/// `map` gets the key and, when the line held a delimiter, the value.
/// Blank lines are skipped. Returns the number of records mapped.
pub fn run_mapper<R, F>(input: R, opts: StreamOptions, mut map: F) -> Result<u64>
where
    R: Read,
    F: FnMut(&str, Option<&str>) -> Result<()>,
{
    let mut records = Records::new(input, opts);
    let mut mapped = 0;
    for record in records.by_ref() {
        let record = record?;
        map(&record.key, record.value())?;
        mapped += 1;
    }
    debug!(lines = records.lines_read(), records = mapped, "mapper finished");
    Ok(mapped)
}
