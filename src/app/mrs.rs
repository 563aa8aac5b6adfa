use anyhow::*;
use clap::Parser;
use mrstream::cmd::mrs::{Args, Commands, Common};
use mrstream::reduce::Strategy;
use mrstream::standalone::{perform_map, perform_reduce};
use mrstream::*;
use std::io;
use tracing_subscriber::EnvFilter;

fn run_map(common: &Common) -> Result<()> {
    let engine = workload::named(&common.workload)?;
    let input = input::open(&common.input_spec())?;
    // stdout is line buffered; each emitted record goes out as it is written
    let mut out = io::stdout().lock();
    perform_map(&engine, input, &mut out, common.stream_options())?;
    Ok(())
}

fn run_reduce(common: &Common, strategy: Strategy) -> Result<()> {
    let engine = workload::named(&common.workload)?;
    let input = input::open(&common.input_spec())?;
    let mut out = io::stdout().lock();
    perform_reduce(&engine, strategy, input, &mut out, common.stream_options())?;
    Ok(())
}

fn main() -> Result<()> {
    // stdout carries the records, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    match args.command {
        Commands::Map { common } => run_map(&common),
        Commands::Reduce { common, strategy } => run_reduce(&common, strategy),
    }
}
