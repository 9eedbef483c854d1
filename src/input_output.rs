use crate::rule::Sample;
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Opens the log for reading. Only a missing path becomes an `ExtractError`,
/// other failures keep their `io::Error`.
pub fn open_log(path: &Path) -> Result<File> {
    match File::open(path) {
        Ok(file) => Ok(file),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            Err(ExtractError::FileNotFound(path.to_owned()).into())
        }
        Err(error) => Err(error).with_context(|| format!("opening {}", path.display())),
    }
}

/// Writes the samples as one space separated line. An empty slice still
/// produces the line terminator.
pub fn output_samples(output: &mut impl Write, samples: &[Sample]) -> io::Result<()> {
    let line = samples
        .iter()
        .map(Sample::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(output, "{}", line)
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}
