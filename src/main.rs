#![forbid(unsafe_code)]

use std::{env, io, path::Path, process::ExitCode};

use anyhow::Result;
use bench_log_filter::{output_samples, process_log, ExtractError};

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: bench-log-filter <file_path>");
        return ExitCode::FAILURE;
    }
    match run(Path::new(&args[1])) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if let Some(ExtractError::FileNotFound(_)) = error.downcast_ref::<ExtractError>() {
                eprintln!("{}", error);
            } else {
                eprintln!("An error occurred: {:#}", error);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path) -> Result<()> {
    let samples = process_log(path)?;
    let mut output_file = io::stdout();
    output_samples(&mut output_file, &samples)?;
    Ok(())
}
