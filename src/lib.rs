//! Streaming MapReduce glue.
//!
//! Mapper and reducer functions run as standalone processes that read
//! `KEY<TAB>VALUE` lines on stdin and write the same format on stdout, in the
//! style of Hadoop Streaming. This crate does the framing, parsing and
//! grouping so that a workload only has to provide a map function and a
//! reduce function.

pub mod cmd;
pub mod emit;
pub mod framer;
pub mod input;
pub mod record;
pub mod reduce;
pub mod standalone;
pub mod stream;
pub mod utils;
pub mod workload;

pub use emit::Emitter;
pub use record::{Fields, Record};

/// The delimiter used between key and value unless configured otherwise.
pub const DEFAULT_DELIMITER: char = '\t';

/////////////////////////////////////////////////////////////////////////////
// MapReduce application types
/////////////////////////////////////////////////////////////////////////////

/// A map function takes a key, an optional value and an emitter.
///
/// The value is [`None`] when the input line held no delimiter.
pub type MapFn = fn(key: &str, value: Option<&str>, out: &mut Emitter<'_>) -> anyhow::Result<()>;

/// A reduce function takes in a key, an iterator over the values for that
/// key, and an emitter.
///
/// Depending on the grouping strategy the iterator is either lazy (pulling
/// records from the input as it goes) or backed by values that were already
/// collected.
pub type ReduceFn = fn(
    key: &str,
    values: Box<dyn Iterator<Item = String> + '_>,
    out: &mut Emitter<'_>,
) -> anyhow::Result<()>;

/// A map reduce application.
#[derive(Copy, Clone)]
pub struct Workload {
    pub map_fn: MapFn,
    pub reduce_fn: ReduceFn,
}
