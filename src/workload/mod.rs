//! Converts workload names to actual map and reduce functions.
//!
//! # Example
//!
//! To get the word count application:
//! ```
//! # use anyhow::Result;
//! use mrstream::workload;
//! # fn main() -> Result<()> {
//! let wc = workload::named("wc")?;
//! # Ok(())
//! # }
//! ```

use crate::Workload;
use anyhow::{bail, Result};

pub mod identity;
pub mod sum;
pub mod wc;

/// Names accepted by [`named`].
pub const NAMES: &[&str] = &["identity", "wc", "sum"];

/// Gets the [`Workload`] named `name`.
///
/// Returns [`None`] if no application with the given name was found.
pub fn try_named(name: &str) -> Option<Workload> {
    match name {
        "identity" => Some(Workload {
            map_fn: identity::map,
            reduce_fn: identity::reduce,
        }),
        "wc" => Some(Workload {
            map_fn: wc::map,
            reduce_fn: wc::reduce,
        }),
        "sum" => Some(Workload {
            map_fn: identity::map,
            reduce_fn: sum::reduce,
        }),
        _ => None,
    }
}

/// Gets the [`Workload`] named `name`.
///
/// Returns an [`anyhow::Error`] if no application with the given name was found.
pub fn named(name: &str) -> Result<Workload> {
    match try_named(name) {
        Some(app) => Ok(app),
        None => bail!("No app named `{}` found (expected one of {:?}).", name, NAMES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in NAMES {
            assert!(try_named(name).is_some(), "{name}");
        }
        assert!(named("grep").is_err());
    }
}
