//! Statistics over the historical archive
//!
//! [`estimate`] derives the sum distribution (mean and sample standard
//! deviation) that the sum-window constraint samples against. The
//! [`frequency`] module holds the descriptive reports: hot/cold numbers,
//! common pairs and days since each number was last drawn.

pub mod frequency;

use crate::archive::HistoricalArchive;
use crate::error::{DrawError, DrawResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Mean and sample standard deviation of historical draw sums
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SumStatistics {
    pub mean: f64,
    pub std_dev: f64,
    /// Number of draws the estimate was computed from
    pub sample_size: usize,
}

impl SumStatistics {
    /// Lower edge of the accepted sum window (`mean - std_dev`)
    pub fn lower(&self) -> f64 {
        self.mean - self.std_dev
    }

    /// Upper edge of the accepted sum window (`mean + std_dev`)
    pub fn upper(&self) -> f64 {
        self.mean + self.std_dev
    }

    /// Inclusive window check
    pub fn contains(&self, sum: u64) -> bool {
        let sum = sum as f64;
        self.lower() <= sum && sum <= self.upper()
    }

    /// True when every historical sum is identical
    ///
    /// The sum window then collapses to an exact-sum match, which is legal
    /// but leaves little room for variety.
    pub fn is_low_diversity(&self) -> bool {
        self.std_dev == 0.0
    }
}

/// Estimate sum statistics from the archive
///
/// Uses the sample standard deviation (divides by `n - 1`).
///
/// # Errors
///
/// `DrawError::InsufficientData` when the archive holds fewer than 2 draws.
pub fn estimate(archive: &HistoricalArchive) -> DrawResult<SumStatistics> {
    let n = archive.len();
    if n < 2 {
        return Err(DrawError::InsufficientData { draws: n });
    }

    let sums: Vec<f64> = archive.sums().map(|s| s as f64).collect();
    let mean = sums.iter().sum::<f64>() / n as f64;
    let variance = sums.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    let stats = SumStatistics {
        mean,
        std_dev: variance.sqrt(),
        sample_size: n,
    };

    if stats.is_low_diversity() {
        warn!(
            mean = stats.mean,
            "all historical sums are identical; sum window is an exact match"
        );
    }

    Ok(stats)
}
