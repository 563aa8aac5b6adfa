//! Eager grouping for reducers: collect every value per key, then reduce.
//!
//! Unlike the positional grouper this merges non-contiguous runs, at the
//! cost of holding the whole input in memory. Keys are handed to the reducer
//! in no particular order.

use crate::record::Record;
use crate::stream::{Records, StreamOptions};
use anyhow::Result;
use fnv::FnvHashMap;
use std::io::Read;
use tracing::debug;

/// Values per key, each in input order.
#[derive(Debug, Default)]
pub struct Accumulator {
    groups: FnvHashMap<String, Vec<String>>,
    records: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the record's value (`""` if absent) under its key.
    pub fn insert(&mut self, record: Record) {
        let (key, value) = record.into_pair();
        #[allow(clippy::unwrap_or_default)]
        self.groups.entry(key).or_insert(Vec::new()).push(value);
        self.records += 1;
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of records inserted.
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Distinct keys, unordered.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Calls `reduce` once per key with all of its values. Returns the number
    /// of reducer calls.
    pub fn reduce_each<F>(self, mut reduce: F) -> Result<u64>
    where
        F: FnMut(&str, Vec<String>) -> Result<()>,
    {
        let mut groups = 0;
        for (key, values) in self.groups {
            reduce(&key, values)?;
            groups += 1;
        }
        Ok(groups)
    }
}

/// Consumes every record into an [`Accumulator`]. Stops at the first error.
pub fn accumulate<I>(records: I) -> Result<Accumulator>
where
    I: Iterator<Item = Result<Record>>,
{
    itertools::process_results(records, |records| {
        let mut acc = Accumulator::new();
        for record in records {
            acc.insert(record);
        }
        acc
    })
}

/// Reads all of `input`, then calls `reduce` once per distinct key.
pub fn run_reducer<R, F>(input: R, opts: StreamOptions, reduce: F) -> Result<u64>
where
    R: Read,
    F: FnMut(&str, Vec<String>) -> Result<()>,
{
    let acc = accumulate(Records::new(input, opts))?;
    debug!(keys = acc.len(), records = acc.records(), "input accumulated");
    acc.reduce_each(reduce)
}
