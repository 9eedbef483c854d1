#![forbid(unsafe_code)]

mod input_output;
pub mod rule;

use anyhow::{Context, Result};
pub use input_output::{open_log, output_samples, ExtractError};
pub use rule::{ExtractionRule, RuleError, RuleSet, Sample};
use std::{
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Opens the log at `path` and extracts its samples with the default rules.
pub fn process_log(path: &Path) -> Result<Vec<Sample>> {
    let mut log_file = open_log(path)?;
    extract_samples(&mut log_file, &RuleSet::default())
}

pub fn extract_samples(input: &mut impl Read, rules: &RuleSet) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    extract_samples_into(input, rules, &mut samples)?;
    log::info!("Extracted {} samples", samples.len());
    Ok(samples)
}

/// Scans `input` line by line. `\n`, `\r\n` and a bare `\r` all end a line.
pub fn extract_samples_into(
    input: &mut impl Read,
    rules: &RuleSet,
    samples: &mut Vec<Sample>,
) -> Result<()> {
    let mut reader = BufReader::new(input);
    let mut buf = String::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        let bytes_read = reader
            .read_line(&mut buf)
            .with_context(|| format!("reading line number {}", line_number + 1))?;
        if bytes_read == 0 {
            break;
        }
        let (body, terminated) = match buf.strip_suffix('\n') {
            Some(body) => (body.strip_suffix('\r').unwrap_or(body), true),
            None => (buf.as_str(), false),
        };
        let mut lines: Vec<&str> = body.split('\r').collect();
        // "x\r" at end of input is one line, not two
        if !terminated && lines.len() > 1 && lines.last() == Some(&"") {
            lines.pop();
        }
        for line in lines {
            line_number += 1;
            scan_line(line, line_number, rules, samples)?;
        }
    }
    Ok(())
}

fn scan_line(
    line: &str,
    line_number: usize,
    rules: &RuleSet,
    samples: &mut Vec<Sample>,
) -> Result<()> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(());
    }
    match rules.find(&tokens) {
        Some(rule) => {
            let sample = rule
                .extract(&tokens)
                .with_context(|| format!("parsing line number {}", line_number))?;
            log::debug!("Line {}: {} {}", line_number, rule.label, sample);
            samples.push(sample);
        }
        None => log::trace!("Line {}: ignored", line_number),
    }
    Ok(())
}
