use anyhow::Result;
use std::io::{Read, Write};
use tracing::info;

use crate::reduce::{pull, push, Strategy};
use crate::stream::{run_mapper, StreamOptions};
use crate::{Emitter, Workload};

/// Runs the workload's map function over `input`, writing emitted records
/// to `output`. Returns the number of records mapped.
pub fn perform_map(
    engine: &Workload,
    input: impl Read,
    output: &mut dyn Write,
    opts: StreamOptions,
) -> Result<u64> {
    let map_func = engine.map_fn;
    let mut out = Emitter::new(output, opts.delimiter);
    let mapped = run_mapper(input, opts, |key, value| map_func(key, value, &mut out))?;
    out.flush()?;
    info!(records = mapped, emitted = out.emitted(), "map done");
    Ok(mapped)
}

/// Groups `input` by key with the given strategy and runs the workload's
/// reduce function once per group. Returns the number of reducer calls.
pub fn perform_reduce(
    engine: &Workload,
    strategy: Strategy,
    input: impl Read,
    output: &mut dyn Write,
    opts: StreamOptions,
) -> Result<u64> {
    let reduce_func = engine.reduce_fn;
    let mut out = Emitter::new(output, opts.delimiter);
    let groups = match strategy {
        Strategy::Pull => pull::run_reducer(input, opts, |key, values| {
            reduce_func(key, Box::new(values), &mut out)
        })?,
        Strategy::Push => push::run_reducer(input, opts, |key, values| {
            reduce_func(key, Box::new(values.into_iter()), &mut out)
        })?,
    };
    out.flush()?;
    info!(?strategy, groups, emitted = out.emitted(), "reduce done");
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload;

    #[test]
    fn word_count_end_to_end() {
        let wc = workload::named("wc").unwrap();
        let mut mapped = Vec::new();
        perform_map(
            &wc,
            "doc1\tthe cat\ndoc2\tthe hat\n".as_bytes(),
            &mut mapped,
            StreamOptions::default(),
        )
        .unwrap();

        // shuffle/sort happens outside of the process
        let mapped = String::from_utf8(mapped).unwrap();
        let mut lines = mapped.lines().collect::<Vec<_>>();
        lines.sort();
        let sorted = lines.join("\n");

        let mut reduced = Vec::new();
        let groups = perform_reduce(
            &wc,
            Strategy::Pull,
            sorted.as_bytes(),
            &mut reduced,
            StreamOptions::default(),
        )
        .unwrap();
        assert_eq!(groups, 4);
        assert_eq!(
            String::from_utf8(reduced).unwrap(),
            "cat\t1\ndoc\t2\nhat\t1\nthe\t2\n"
        );
    }
}
