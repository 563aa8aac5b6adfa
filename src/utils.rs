//! Utility functions shared by the drivers.
//!

use anyhow::{Context, Result};
use bytes::Bytes;

/// Read an entire [`Bytes`] line into a [`String`].
///
/// Returns an error if the line contains invalid UTF-8.
pub fn string_from_bytes(buf: Bytes) -> Result<String> {
    String::from_utf8(buf.as_ref().into()).context("input line is not valid UTF-8")
}

/// Like [`string_from_bytes`], but replaces invalid sequences with U+FFFD.
pub fn string_from_bytes_lossy(buf: Bytes) -> String {
    String::from_utf8_lossy(&buf).into_owned()
}

/// Decode a line, strictly or lossily.
#[inline]
pub fn decode_line(buf: Bytes, lossy: bool) -> Result<String> {
    if lossy {
        Ok(string_from_bytes_lossy(buf))
    } else {
        string_from_bytes(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_decoding_rejects_invalid_utf8() {
        let bad = Bytes::from_static(b"ab\xffc\n");
        assert!(string_from_bytes(bad.clone()).is_err());
        assert_eq!(string_from_bytes_lossy(bad), "ab\u{fffd}c\n");
    }

    #[test]
    fn decode_line_passes_valid_text_through() {
        let line = Bytes::from_static("clé\tvaleur\n".as_bytes());
        assert_eq!(decode_line(line.clone(), false).unwrap(), "clé\tvaleur\n");
        assert_eq!(decode_line(line, true).unwrap(), "clé\tvaleur\n");
    }
}
