//! CLI argument parsing using clap

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExecutionMode {
    /// Generate new draws (default)
    Generate,
    /// Print frequency, pair and recency reports for the archive only
    Analyze,
}

/// drawgen - propose novel draws consistent with a historical archive
#[derive(Parser, Debug)]
#[command(name = "drawgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Execution mode: generate or analyze
    #[arg(long, value_enum, default_value = "generate")]
    pub mode: ExecutionMode,

    /// Historical draws file (overrides input.path from the config file)
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Input Options ===
    /// Comma-separated number column names (e.g., "Num1,Num2,Num3,Num4,Num5")
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Draw date column name
    #[arg(long)]
    pub date_column: Option<String>,

    /// Draw date format (chrono syntax, e.g., "%Y-%m-%d")
    #[arg(long)]
    pub date_format: Option<String>,

    /// Field delimiter of the input file
    #[arg(long)]
    pub delimiter: Option<char>,

    // === Sampling Options ===
    /// Values per draw (k)
    #[arg(short = 'k', long)]
    pub draw_size: Option<usize>,

    /// Largest drawable number (N)
    #[arg(short = 'n', long)]
    pub max_number: Option<u32>,

    /// Number of draws to generate
    #[arg(short = 't', long)]
    pub count: Option<usize>,

    /// Candidate ceiling per run
    #[arg(short = 'a', long)]
    pub max_attempts: Option<u64>,

    /// RNG seed for reproducible runs
    #[arg(long, env = "DRAWGEN_SEED")]
    pub seed: Option<u64>,

    /// Number of independent runs, executed in parallel
    #[arg(long)]
    pub batches: Option<usize>,

    /// Wall-clock limit for generation (e.g., 30s, 5m)
    #[arg(long)]
    pub time_limit: Option<String>,

    // === Output Options ===
    /// Write generated draws to CSV
    #[arg(long)]
    pub csv_output: Option<PathBuf>,

    /// Write a JSON run report
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Rows shown in frequency reports
    #[arg(long)]
    pub top: Option<usize>,

    /// Suppress console output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Validate configuration and input, then exit
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Checks that do not need the config file
    pub fn validate(&self) -> Result<()> {
        if self.config.is_none() && self.input.is_none() {
            anyhow::bail!("either a config file (--config) or an input PATH is required");
        }

        if self.columns.iter().any(|c| c.trim().is_empty()) {
            anyhow::bail!("--columns contains an empty column name");
        }

        if self.quiet && self.verbose {
            anyhow::bail!("--quiet and --verbose cannot be combined");
        }

        Ok(())
    }
}
