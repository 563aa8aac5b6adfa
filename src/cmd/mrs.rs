use crate::framer::DEFAULT_CHUNK_SIZE;
use crate::input::InputSpec;
use crate::reduce::Strategy;
use crate::stream::StreamOptions;
use crate::DEFAULT_DELIMITER;
use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a workload's map function over every input record
    Map {
        #[command(flatten)]
        common: Common,
    },
    /// Group input records by key and run a workload's reduce function
    Reduce {
        #[command(flatten)]
        common: Common,

        /// Grouping strategy: `pull` streams contiguous runs of sorted
        /// input, `push` collects all values per key first
        #[arg(short, long, value_enum, default_value_t = Strategy::Pull)]
        strategy: Strategy,
    },
}

/// Options shared by both roles.
#[derive(ClapArgs, Debug, Clone)]
pub struct Common {
    /// Name of the workload
    #[arg(short, long)]
    pub workload: String,

    /// Character separating key and value, on input and output
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// [OPT] Glob spec for the input files; stdin when omitted
    #[arg(short, long)]
    pub input: Option<String>,

    /// Bytes read per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// [OPT] Stop reading after this many input bytes
    #[arg(long)]
    pub max_input_bytes: Option<u64>,

    /// Replace invalid UTF-8 instead of failing
    #[arg(long)]
    pub lossy: bool,
}

impl Common {
    pub fn stream_options(&self) -> StreamOptions {
        StreamOptions {
            delimiter: self.delimiter,
            chunk_size: self.chunk_size,
            lossy: self.lossy,
        }
    }

    pub fn input_spec(&self) -> InputSpec {
        InputSpec {
            glob: self.input.clone(),
            max_bytes: self.max_input_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_defaults() {
        let args = Args::try_parse_from(["mrs", "reduce", "-w", "wc"]).unwrap();
        match args.command {
            Commands::Reduce { common, strategy } => {
                assert_eq!(strategy, Strategy::Pull);
                assert_eq!(common.workload, "wc");
                let opts = common.stream_options();
                assert_eq!(opts.delimiter, '\t');
                assert_eq!(opts.chunk_size, DEFAULT_CHUNK_SIZE);
                assert!(common.input_spec().glob.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn map_with_options() {
        let args = Args::try_parse_from([
            "mrs",
            "map",
            "--workload",
            "identity",
            "--delimiter",
            ",",
            "--input",
            "data/*.txt",
            "--max-input-bytes",
            "100",
            "--lossy",
        ])
        .unwrap();
        let Commands::Map { common } = args.command else {
            panic!("expected map");
        };
        assert_eq!(common.delimiter, ',');
        assert!(common.lossy);
        let spec = common.input_spec();
        assert_eq!(spec.glob.as_deref(), Some("data/*.txt"));
        assert_eq!(spec.max_bytes, Some(100));
    }

    #[test]
    fn push_strategy_parses() {
        let args = Args::try_parse_from(["mrs", "reduce", "-w", "sum", "-s", "push"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Reduce {
                strategy: Strategy::Push,
                ..
            }
        ));
    }
}
