//! Sums integer values per key.

use crate::Emitter;
use anyhow::{Context, Result};

pub fn reduce(
    key: &str,
    values: Box<dyn Iterator<Item = String> + '_>,
    out: &mut Emitter<'_>,
) -> Result<()> {
    let mut total: i64 = 0;
    for value in values {
        let n: i64 = value
            .trim()
            .parse()
            .with_context(|| format!("value for `{}` is not an integer: {:?}", key, value))?;
        total = total
            .checked_add(n)
            .with_context(|| format!("sum for `{}` overflows", key))?;
    }
    out.emit(key, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(values: &[&str]) -> Result<String> {
        let mut buf = Vec::new();
        let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        reduce("k", Box::new(values.into_iter()), &mut Emitter::new(&mut buf, '\t'))?;
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn sums_signed_values() {
        assert_eq!(run(&["4", "-1", "10"]).unwrap(), "k\t13\n");
    }

    #[test]
    fn rejects_non_numbers() {
        assert!(run(&["4", "four"]).is_err());
        assert!(run(&[""]).is_err());
    }
}
