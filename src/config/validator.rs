//! Configuration validation

use super::*;
use crate::archive::check_shape;
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_sampling(&config.sampling)?;
    validate_input(&config.input, config.sampling.draw_size)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate configuration for analysis only
///
/// Analysis never samples, so only the draw shape is checked from the
/// sampling section; `target_count` and `max_attempts` are ignored.
pub fn validate_analysis(config: &Config) -> Result<()> {
    check_shape(config.sampling.draw_size, config.sampling.max_number)
        .context("Sampling configuration is invalid")?;
    validate_input(&config.input, config.sampling.draw_size)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate sampling configuration
pub fn validate_sampling(sampling: &SamplingConfig) -> Result<()> {
    sampling.validate().context("Sampling configuration is invalid")
}

/// Validate input configuration against the draw size
pub fn validate_input(input: &InputConfig, draw_size: usize) -> Result<()> {
    if input.path.is_none() {
        anyhow::bail!("no input file given (set input.path or pass PATH)");
    }

    if input.number_columns.len() != draw_size {
        anyhow::bail!(
            "expected {} number columns for draw_size {}, got {} ({:?})",
            draw_size,
            draw_size,
            input.number_columns.len(),
            input.number_columns
        );
    }

    let mut seen = HashSet::new();
    for column in &input.number_columns {
        if !seen.insert(column.as_str()) {
            anyhow::bail!("number column '{}' is listed more than once", column);
        }
    }

    if let Some(ref date_column) = input.date_column {
        if seen.contains(date_column.as_str()) {
            anyhow::bail!("date column '{}' is also listed as a number column", date_column);
        }
    }

    if input.delimiter == '"' || !input.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character other than '\"', got {:?}", input.delimiter);
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.top_n == 0 {
        anyhow::bail!("top_n must be at least 1");
    }

    if let (Some(csv), Some(json)) = (&output.csv, &output.json) {
        if csv == json {
            anyhow::bail!("csv and json outputs point to the same file: {}", csv.display());
        }
    }

    Ok(())
}
