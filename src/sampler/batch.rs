//! Independent sampling batches
//!
//! Sequential disjointness ties each acceptance to the one before it, so a
//! single run cannot be split across threads. Separate runs share nothing but
//! the read-only archive and statistics, and run here in parallel with rayon.
//! Batch `i` is seeded with [`derive_seed`]`(base_seed, i)`, so results are
//! reproducible regardless of thread scheduling.

use super::source::{derive_seed, UniformSource};
use super::{CancelFlag, DrawSampler, GenerationOutcome};
use crate::archive::HistoricalArchive;
use crate::config::SamplingConfig;
use crate::error::DrawResult;
use crate::stats::SumStatistics;
use rayon::prelude::*;
use std::time::Instant;

/// Options shared by every batch of a parallel generation
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub cancel: Option<CancelFlag>,
    pub deadline: Option<Instant>,
}

/// Run `config.batches` independent sampling runs in parallel
///
/// Outcomes are returned in batch order. Each batch gets its own sampler
/// state and random source.
pub fn generate_batches(
    archive: &HistoricalArchive,
    stats: &SumStatistics,
    config: &SamplingConfig,
    base_seed: u64,
    options: &BatchOptions,
) -> DrawResult<Vec<GenerationOutcome>> {
    (0..config.batches)
        .into_par_iter()
        .map(|index| {
            let source = UniformSource::with_seed(derive_seed(base_seed, index as u64));
            let mut sampler = DrawSampler::new(source);
            if let Some(flag) = &options.cancel {
                sampler = sampler.with_cancel(flag.clone());
            }
            if let Some(deadline) = options.deadline {
                sampler = sampler.with_deadline(deadline);
            }
            sampler.run(archive, stats, config)
        })
        .collect()
}
