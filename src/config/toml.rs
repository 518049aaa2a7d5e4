//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::parse_duration;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Override sampling settings
    if let Some(k) = cli.draw_size {
        config.sampling.draw_size = k;
    }
    if let Some(n) = cli.max_number {
        config.sampling.max_number = n;
    }
    if let Some(count) = cli.count {
        config.sampling.target_count = count;
    }
    if let Some(attempts) = cli.max_attempts {
        config.sampling.max_attempts = attempts;
    }
    if let Some(seed) = cli.seed {
        config.sampling.seed = Some(seed);
    }
    if let Some(batches) = cli.batches {
        config.sampling.batches = batches;
    }
    if let Some(ref limit) = cli.time_limit {
        let seconds = parse_duration(limit).context("Invalid time limit")?;
        config.sampling.time_limit_secs = Some(seconds);
    }

    // Override input settings
    if let Some(ref path) = cli.input {
        config.input.path = Some(path.clone());
    }
    if !cli.columns.is_empty() {
        config.input.number_columns = cli.columns.iter().map(|c| c.trim().to_string()).collect();
    }
    if let Some(ref column) = cli.date_column {
        config.input.date_column = Some(column.clone());
    }
    if let Some(ref format) = cli.date_format {
        config.input.date_format = Some(format.clone());
    }
    if let Some(delimiter) = cli.delimiter {
        config.input.delimiter = delimiter;
    }

    // Override output settings
    if let Some(ref path) = cli.csv_output {
        config.output.csv = Some(path.clone());
    }
    if let Some(ref path) = cli.json_output {
        config.output.json = Some(path.clone());
    }
    if let Some(top) = cli.top {
        config.output.top_n = top;
    }
    if cli.quiet {
        config.output.quiet = true;
    }

    Ok(config)
}
