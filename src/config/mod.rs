//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::archive::check_shape;
use crate::error::{DrawError, DrawResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Parameters of one generation request
///
/// `max_attempts` has no default: every run states its retry ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Values per draw (`k`)
    pub draw_size: usize,
    /// Upper bound of the number range (`N`), inclusive
    pub max_number: u32,
    /// Desired number of accepted draws
    #[serde(default = "default_target_count")]
    pub target_count: usize,
    /// Candidate ceiling per run
    pub max_attempts: u64,
    /// RNG seed; drawn from entropy and reported when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Number of independent runs
    #[serde(default = "default_batches")]
    pub batches: usize,
    /// Wall-clock limit for the whole generation, in seconds
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

/// Draws generated when neither the CLI nor a config file says otherwise
pub const DEFAULT_TARGET_COUNT: usize = 5;

fn default_target_count() -> usize {
    DEFAULT_TARGET_COUNT
}

fn default_batches() -> usize {
    1
}

impl SamplingConfig {
    pub fn new(draw_size: usize, max_number: u32, target_count: usize, max_attempts: u64) -> Self {
        Self {
            draw_size,
            max_number,
            target_count,
            max_attempts,
            seed: None,
            batches: default_batches(),
            time_limit_secs: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field before any sampling starts
    ///
    /// # Errors
    ///
    /// `DrawError::Configuration` naming the first offending field.
    pub fn validate(&self) -> DrawResult<()> {
        check_shape(self.draw_size, self.max_number)?;

        if self.target_count == 0 {
            return Err(DrawError::config("target_count must be at least 1"));
        }
        if self.max_attempts == 0 {
            return Err(DrawError::config("max_attempts must be at least 1"));
        }
        if self.batches == 0 {
            return Err(DrawError::config("batches must be at least 1"));
        }
        if self.time_limit_secs == Some(0) {
            return Err(DrawError::config("time_limit must be positive when set"));
        }

        // Only ten distinct last digits exist
        if self.draw_size > 10 {
            warn!(
                draw_size = self.draw_size,
                "draw_size above 10 can never satisfy last-digit uniqueness; every candidate will be rejected"
            );
        }

        Ok(())
    }
}

/// Historical input file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Delimited file with one historical draw per row
    pub path: Option<PathBuf>,
    /// Header names of the `k` number columns
    #[serde(default)]
    pub number_columns: Vec<String>,
    /// Header name of the draw date column
    pub date_column: Option<String>,
    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// chrono format string for the date column
    pub date_format: Option<String>,
}

fn default_delimiter() -> char {
    ','
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            number_columns: Vec::new(),
            date_column: None,
            delimiter: default_delimiter(),
            date_format: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV export of generated draws
    pub csv: Option<PathBuf>,
    /// JSON run report
    pub json: Option<PathBuf>,
    /// Suppress console output
    #[serde(default)]
    pub quiet: bool,
    /// Rows shown in frequency reports
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    10
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv: None,
            json: None,
            quiet: false,
            top_n: default_top_n(),
        }
    }
}
