//! Running one workload role (map or reduce) as a standalone process.

pub mod engine;

pub use engine::{perform_map, perform_reduce};
