//! JSON output formatting
//!
//! Serializes a complete run (configuration, summary, sum statistics and all
//! generated draws) with a generation timestamp.

use crate::config::SamplingConfig;
use crate::pipeline::{BatchResult, RunReport, RunSummary};
use crate::stats::SumStatistics;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Sum window used for acceptance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSumWindow {
    pub lower: f64,
    pub upper: f64,
}

/// Top-level JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub config: SamplingConfig,
    pub summary: RunSummary,
    pub statistics: SumStatistics,
    pub sum_window: JsonSumWindow,
    pub batches: Vec<BatchResult>,
}

impl JsonReport {
    pub fn new(report: &RunReport, config: &SamplingConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            config: config.clone(),
            summary: report.summary.clone(),
            statistics: report.statistics,
            sum_window: JsonSumWindow {
                lower: report.statistics.lower(),
                upper: report.statistics.upper(),
            },
            batches: report.batches.clone(),
        }
    }
}

/// Write JSON report to file
pub fn write_report(output_path: &Path, report: &RunReport, config: &SamplingConfig, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    let writer = BufWriter::new(file);
    let doc = JsonReport::new(report, config);

    if pretty {
        serde_json::to_writer_pretty(writer, &doc)?;
    } else {
        serde_json::to_writer(writer, &doc)?;
    }

    Ok(())
}
