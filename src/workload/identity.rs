//! Passes records through unchanged.

use crate::Emitter;
use anyhow::Result;

pub fn map(key: &str, value: Option<&str>, out: &mut Emitter<'_>) -> Result<()> {
    out.emit(key, value.unwrap_or_default())
}

pub fn reduce(
    key: &str,
    values: Box<dyn Iterator<Item = String> + '_>,
    out: &mut Emitter<'_>,
) -> Result<()> {
    for value in values {
        out.emit(key, value)?;
    }
    Ok(())
}
