//! Grouping reducer input by key.
//!
//! Two strategies are available: [`pull`] scans sorted input positionally
//! and streams each key's values, [`push`] collects everything in memory
//! first.

use clap::ValueEnum;

pub mod pull;
pub mod push;

/// How reducer input is grouped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Strategy {
    /// Contiguous runs of sorted input, streamed.
    #[default]
    Pull,
    /// All values per key, collected before reducing.
    Push,
}
