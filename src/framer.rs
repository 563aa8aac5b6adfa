//! Turns chunked input into complete lines.
//!
//! Input arrives in chunks whose boundaries have nothing to do with line
//! boundaries. [`LineFramer`] buffers the bytes that have not yet been
//! resolved into a line, rewrites every terminator variant (`\n`, `\r`,
//! `\r\n`) to `\n`, and hands out complete lines including their `\n`.
//! At end-of-input the residual partial line, if any, is handed out once
//! without a terminator.

use bytes::{BufMut, Bytes, BytesMut};
use std::io::{self, Read};
use tracing::trace;

/// Default number of bytes requested from the reader per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Line-buffering state machine.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: BytesMut,
    /// Bytes at the front of `buf` already known to hold no `\n`.
    scanned: usize,
    /// The last chunk ended in `\r`; whether it pairs with a `\n` is decided
    /// by the next chunk.
    pending_cr: bool,
    finished: bool,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one chunk of input.
    ///
    /// Pushing after [`finish`](Self::finish) is a logic error; the chunk is
    /// still buffered and will be handed out by [`next_line`](Self::next_line).
    pub fn push(&mut self, chunk: &[u8]) {
        let mut chunk = chunk;
        if chunk.is_empty() {
            return;
        }
        if self.pending_cr {
            self.pending_cr = false;
            self.buf.put_u8(b'\n');
            if chunk[0] == b'\n' {
                chunk = &chunk[1..];
            }
        }
        while let Some(i) = chunk.iter().position(|&b| b == b'\r') {
            self.buf.extend_from_slice(&chunk[..i]);
            match chunk.get(i + 1) {
                Some(b'\n') => {
                    self.buf.put_u8(b'\n');
                    chunk = &chunk[i + 2..];
                }
                Some(_) => {
                    self.buf.put_u8(b'\n');
                    chunk = &chunk[i + 1..];
                }
                None => {
                    self.pending_cr = true;
                    chunk = &[];
                }
            }
        }
        self.buf.extend_from_slice(chunk);
    }

    /// Signals end-of-input. Any residual becomes available from
    /// [`next_line`](Self::next_line) after the complete lines.
    pub fn finish(&mut self) {
        if self.pending_cr {
            self.pending_cr = false;
            self.buf.put_u8(b'\n');
        }
        self.finished = true;
    }

    /// Returns the next complete line, or after [`finish`](Self::finish) the
    /// non-empty residual. Returns [`None`] when nothing can be handed out.
    pub fn next_line(&mut self) -> Option<Bytes> {
        if let Some(i) = self.buf[self.scanned..].iter().position(|&b| b == b'\n') {
            let end = self.scanned + i + 1;
            self.scanned = 0;
            return Some(self.buf.split_to(end).freeze());
        }
        self.scanned = self.buf.len();
        if self.finished && !self.buf.is_empty() {
            self.scanned = 0;
            return Some(self.buf.split().freeze());
        }
        None
    }

    /// Number of bytes buffered but not yet handed out.
    pub fn buffered(&self) -> usize {
        self.buf.len() + usize::from(self.pending_cr)
    }
}

/// Iterator adapter that reads chunks from `R` and yields framed lines.
pub struct FramedLines<R: Read> {
    reader: R,
    framer: LineFramer,
    chunk: Vec<u8>,
    eof: bool,
}

impl<R: Read> FramedLines<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// A chunk size of 0 is bumped to 1.
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            framer: LineFramer::new(),
            chunk: vec![0; chunk_size.max(1)],
            eof: false,
        }
    }
}

impl<R: Read> Iterator for FramedLines<R> {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.framer.next_line() {
                return Some(Ok(line));
            }
            if self.eof {
                return None;
            }
            match self.reader.read(&mut self.chunk) {
                Ok(0) => {
                    trace!(residual = self.framer.buffered(), "end of input");
                    self.framer.finish();
                    self.eof = true;
                }
                Ok(n) => {
                    trace!(bytes = n, "read chunk");
                    self.framer.push(&self.chunk[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.eof = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
