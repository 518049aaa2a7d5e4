//! CLI to Config conversion utilities

use crate::config::cli::{Cli, ExecutionMode};
use crate::config::toml::merge_cli_with_config;
use crate::config::{Config, InputConfig, OutputConfig, SamplingConfig, DEFAULT_TARGET_COUNT};
use anyhow::{Context, Result};

/// Parse a duration string (e.g., "60s", "5m", "1h") to seconds
pub fn parse_duration(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if s.ends_with("sec") || s.ends_with('s') {
        (s.trim_end_matches("sec").trim_end_matches('s'), 1u64)
    } else if s.ends_with("min") || s.ends_with('m') {
        (s.trim_end_matches("min").trim_end_matches('m'), 60)
    } else if s.ends_with("hr") || s.ends_with('h') {
        (s.trim_end_matches("hr").trim_end_matches('h'), 3600)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid duration format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Duration too large: {}", s))
}

/// Build configuration from CLI arguments alone (no config file)
///
/// `--draw-size` and `--max-number` are mandatory here; so is `--max-attempts`
/// unless the mode is analyze, which never samples.
pub fn build_config_from_cli(cli: &Cli) -> Result<Config> {
    let draw_size = cli
        .draw_size
        .context("--draw-size is required when no config file is given")?;
    let max_number = cli
        .max_number
        .context("--max-number is required when no config file is given")?;
    let max_attempts = match (cli.max_attempts, cli.mode) {
        (Some(attempts), _) => attempts,
        (None, ExecutionMode::Analyze) => 0,
        (None, ExecutionMode::Generate) => {
            anyhow::bail!("--max-attempts is required when no config file is given")
        }
    };

    let config = Config {
        sampling: SamplingConfig::new(
            draw_size,
            max_number,
            cli.count.unwrap_or(DEFAULT_TARGET_COUNT),
            max_attempts,
        ),
        input: InputConfig::default(),
        output: OutputConfig::default(),
    };

    merge_cli_with_config(cli, config)
}
