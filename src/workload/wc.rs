//! Word count.
//!

use crate::Emitter;
use anyhow::{Context, Result};

/// Emits `(word, 1)` for every alphabetic word in the key and value.
pub fn map(key: &str, value: Option<&str>, out: &mut Emitter<'_>) -> Result<()> {
    let text = [Some(key), value];
    let words = text
        .into_iter()
        .flatten()
        .flat_map(|s| s.split(|c: char| !c.is_alphabetic()))
        .filter(|s| !s.is_empty())
        .map(|word| word.to_lowercase());
    for word in words {
        out.emit(word, 1)?;
    }
    Ok(())
}

pub fn reduce(
    key: &str,
    values: Box<dyn Iterator<Item = String> + '_>,
    out: &mut Emitter<'_>,
) -> Result<()> {
    let mut count: u64 = 0;
    for value in values {
        let n = value
            .trim()
            .parse::<u64>()
            .with_context(|| format!("count for `{}` is not a number: {:?}", key, value))?;
        count = count
            .checked_add(n)
            .with_context(|| format!("count for `{}` overflows", key))?;
    }
    out.emit(key, count)
}
