//! Positional grouping for reducers.
//!
//! A single [`KeyCursor`] walks the input strictly forward. For each run of
//! adjacent records with the same key the driver hands the reducer a
//! [`Values`] iterator bound to that key; the iterator yields values only as
//! long as the cursor still sits on its key. Input is expected to be sorted
//! by key. Unsorted input is not regrouped: every contiguous run becomes its
//! own reducer call. Values a reducer leaves unread are dropped (and
//! logged at warn level) before the next run starts.

use crate::record::Record;
use crate::stream::{Records, StreamOptions};
use anyhow::Result;
use std::io::Read;
use tracing::{debug, trace, warn};

/// The next unconsumed record of the input, or end-of-input.
pub struct KeyCursor<I: Iterator<Item = Result<Record>>> {
    records: I,
    current: Option<(String, String)>,
    /// A read error ends the input; it is kept here until the driver asks.
    error: Option<anyhow::Error>,
}

impl<I: Iterator<Item = Result<Record>>> KeyCursor<I> {
    /// Creates an unprimed cursor. Call [`advance`](Self::advance) once
    /// before reading from it.
    pub fn new(records: I) -> Self {
        Self {
            records,
            current: None,
            error: None,
        }
    }

    /// Moves to the next record, or to end-of-input.
    pub fn advance(&mut self) {
        if self.error.is_some() {
            self.current = None;
            return;
        }
        self.current = match self.records.next() {
            Some(Ok(record)) => Some(record.into_pair()),
            Some(Err(e)) => {
                self.error = Some(e);
                None
            }
            None => None,
        };
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current.as_ref().map(|(k, _)| k.as_str())
    }

    pub fn current_value(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, v)| v.as_str())
    }

    /// True iff the cursor is not at end-of-input and sits on `key`.
    pub fn at_key(&self, key: &str) -> bool {
        self.current_key() == Some(key)
    }

    /// Returns the current value and advances.
    fn take_value(&mut self) -> Option<String> {
        let (_, value) = self.current.take()?;
        self.advance();
        Some(value)
    }

    /// Advances past the rest of the run for `key`. Returns how many
    /// records were dropped.
    fn skip_key(&mut self, key: &str) -> u64 {
        let mut skipped = 0;
        while self.at_key(key) {
            self.advance();
            skipped += 1;
        }
        skipped
    }

    /// Returns the read error that ended the input, if any.
    pub fn take_error(&mut self) -> Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// The values of one contiguous run of records sharing a key.
pub struct Values<'c, I: Iterator<Item = Result<Record>>> {
    cursor: &'c mut KeyCursor<I>,
    key: String,
}

impl<'c, I: Iterator<Item = Result<Record>>> Values<'c, I> {
    pub fn new(cursor: &'c mut KeyCursor<I>, key: String) -> Self {
        Self { cursor, key }
    }

    /// The key this iterator is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// True iff another value for this key is available.
    pub fn has_next(&self) -> bool {
        self.cursor.at_key(&self.key)
    }
}

impl<'c, I: Iterator<Item = Result<Record>>> Iterator for Values<'c, I> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if !self.has_next() {
            return None;
        }
        self.cursor.take_value()
    }
}

/// Groups `records` by contiguous key and calls `reduce` once per run.
///
/// Values the reducer leaves unread are skipped before the next run starts.
/// Returns the number of reducer calls.
pub fn reduce_groups<I, F>(records: I, mut reduce: F) -> Result<u64>
where
    I: Iterator<Item = Result<Record>>,
    F: FnMut(&str, Values<'_, I>) -> Result<()>,
{
    let mut cursor = KeyCursor::new(records);
    cursor.advance();
    let mut groups = 0;
    while let Some(key) = cursor.current_key().map(str::to_owned) {
        trace!(key = %key, "reducing group");
        reduce(&key, Values::new(&mut cursor, key.clone()))?;
        let skipped = cursor.skip_key(&key);
        if skipped > 0 {
            warn!(key = %key, skipped, "reducer left values unread; skipping them");
        }
        groups += 1;
    }
    cursor.take_error()?;
    Ok(groups)
}

/// Reads `input` and reduces it with positional grouping.
pub fn run_reducer<R, F>(input: R, opts: StreamOptions, reduce: F) -> Result<u64>
where
    R: Read,
    F: FnMut(&str, Values<'_, Records<R>>) -> Result<()>,
{
    let groups = reduce_groups(Records::new(input, opts), reduce)?;
    debug!(groups, "pull reducer finished");
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(input: &[(&str, &str)]) -> impl Iterator<Item = Result<Record>> {
        input
            .iter()
            .map(|(k, v)| Ok(Record::new(*k, Some(v.to_string()))))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn cursor_walks_forward() {
        let mut cursor = KeyCursor::new(records(&[("a", "1"), ("b", "2")]));
        assert!(cursor.is_end());
        cursor.advance();
        assert_eq!(cursor.current_key(), Some("a"));
        assert_eq!(cursor.current_value(), Some("1"));
        cursor.advance();
        assert!(cursor.at_key("b"));
        cursor.advance();
        assert!(cursor.is_end());
        assert!(!cursor.at_key("b"));
    }

    #[test]
    fn values_stop_at_key_change() {
        let mut cursor = KeyCursor::new(records(&[("a", "1"), ("a", "2"), ("b", "3")]));
        cursor.advance();
        let mut values = Values::new(&mut cursor, "a".to_string());
        assert!(values.has_next());
        assert_eq!(values.next().as_deref(), Some("1"));
        assert_eq!(values.next().as_deref(), Some("2"));
        assert!(!values.has_next());
        assert_eq!(values.next(), None);
        assert_eq!(cursor.current_key(), Some("b"));
    }

    #[test]
    fn undrained_values_are_skipped() {
        let input = records(&[("a", "1"), ("a", "2"), ("a", "3"), ("b", "4")]);
        let mut calls = Vec::new();
        reduce_groups(input, |key, mut values| {
            calls.push((key.to_string(), values.next()));
            Ok(())
        })
        .unwrap();
        assert_eq!(
            calls,
            vec![
                ("a".to_string(), Some("1".to_string())),
                ("b".to_string(), Some("4".to_string())),
            ]
        );
    }

    #[test]
    fn read_error_surfaces_after_reducer_returns() {
        let input = vec![
            Ok(Record::new("a", Some("1".to_string()))),
            Err(anyhow::anyhow!("disk on fire")),
            Ok(Record::new("a", Some("2".to_string()))),
        ];
        let mut seen = Vec::new();
        let res = reduce_groups(input.into_iter(), |_, values| {
            seen.extend(values);
            Ok(())
        });
        assert_eq!(seen, vec!["1"]);
        assert!(res.unwrap_err().to_string().contains("disk on fire"));
    }

    #[test]
    fn reducer_error_is_returned() {
        let res = reduce_groups(records(&[("a", "1")]), |_, _| anyhow::bail!("nope"));
        assert!(res.is_err());
    }
}
