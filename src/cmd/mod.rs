//! Command-line definitions for the binaries.

pub mod mrs;
