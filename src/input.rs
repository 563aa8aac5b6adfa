//! Input sources for the `mrs` binary: stdin, or files matched by a glob.
//!

use anyhow::{bail, Context, Result};
use glob::glob;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Where the input bytes come from.
#[derive(Clone, Debug, Default)]
pub struct InputSpec {
    /// Glob spec for input files; stdin when unset.
    pub glob: Option<String>,
    /// Treat everything past this many bytes as end-of-input.
    pub max_bytes: Option<u64>,
}

/// Paths matching `pattern`, in sorted order.
pub fn matching_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob(pattern).with_context(|| format!("bad input glob `{}`", pattern))? {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => warn!("skipping unreadable input: {}", e),
        }
    }
    paths.sort();
    Ok(paths)
}

/// Opens the input described by `spec` as one reader.
///
/// Files are concatenated in sorted path order. A file that does not end
/// in a line terminator runs into the first line of the next file, the same
/// as `cat`.
pub fn open(spec: &InputSpec) -> Result<Box<dyn Read>> {
    let reader: Box<dyn Read> = match &spec.glob {
        None => Box::new(io::stdin().lock()),
        Some(pattern) => {
            let paths = matching_files(pattern)?;
            if paths.is_empty() {
                bail!("No input files match `{}`.", pattern);
            }
            let mut reader: Box<dyn Read> = Box::new(io::empty());
            for path in paths {
                debug!(path = %path.display(), "adding input file");
                let file = File::open(&path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                reader = Box::new(reader.chain(file));
            }
            reader
        }
    };
    Ok(cap(reader, spec.max_bytes))
}

/// Limits `reader` to `max_bytes`, if set.
pub fn cap<'a>(reader: Box<dyn Read + 'a>, max_bytes: Option<u64>) -> Box<dyn Read + 'a> {
    match max_bytes {
        Some(limit) => Box::new(reader.take(limit)),
        None => reader,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mrstream-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn cap_truncates_input() {
        let mut out = String::new();
        cap(Box::new("abcdef".as_bytes()), Some(4))
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "abcd");

        out.clear();
        cap(Box::new("abc".as_bytes()), None)
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "abc");
    }

    #[test]
    fn glob_inputs_are_concatenated_in_order() {
        let dir = scratch_dir("glob");
        fs::write(dir.join("part-1.txt"), "b\t2\n").unwrap();
        fs::write(dir.join("part-0.txt"), "a\t1\n").unwrap();
        fs::write(dir.join("ignored.log"), "zzz\n").unwrap();

        let spec = InputSpec {
            glob: Some(format!("{}/part-*.txt", dir.display())),
            max_bytes: None,
        };
        let mut out = String::new();
        open(&spec).unwrap().read_to_string(&mut out).unwrap();
        assert_eq!(out, "a\t1\nb\t2\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_glob_is_an_error() {
        let dir = scratch_dir("empty");
        let spec = InputSpec {
            glob: Some(format!("{}/*.nothing", dir.display())),
            max_bytes: None,
        };
        assert!(open(&spec).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
