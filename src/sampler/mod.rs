//! Constrained rejection sampler
//!
//! Proposes novel draws by sampling uniformly and rejecting candidates that
//! fail any [`Constraint`]:
//!
//! 1. Draw `k` distinct values from `[1, N]` and sort them
//! 2. Count the attempt
//! 3. Accept if every constraint holds; the accepted draw becomes the anchor
//!    for the sequential-disjointness check
//! 4. Otherwise discard it; the anchor does not move
//!
//! The run stops when `target_count` draws are accepted or `max_attempts`
//! candidates have been tried. Running out of attempts is not an error: the
//! outcome carries whatever was accepted with `exhausted = true`.
//!
//! # Determinism
//!
//! All randomness comes from the injected [`CandidateSource`]. The same
//! archive, config and seed always produce the same accepted sequence.
//!
//! # Concurrency
//!
//! One run is strictly sequential (each acceptance depends on the previous
//! one). Independent runs can execute in parallel, see [`batch`].
//!
//! # Example
//!
//! ```
//! use drawgen::archive::{HistoricalArchive, RawRecord};
//! use drawgen::config::SamplingConfig;
//! use drawgen::{sampler, stats};
//!
//! let records = vec![
//!     RawRecord::from_numbers(&[1, 2, 3, 4, 5]),
//!     RawRecord::from_numbers(&[10, 20, 30, 35, 39]),
//!     RawRecord::from_numbers(&[5, 15, 25, 35, 36]),
//! ];
//! let (archive, _) = HistoricalArchive::build(records, 5, 39).unwrap();
//! let stats = stats::estimate(&archive).unwrap();
//!
//! let config = SamplingConfig::new(5, 39, 1, 20_000).with_seed(42);
//! let outcome = sampler::generate(&archive, &stats, &config).unwrap();
//! assert_eq!(outcome.draws.len(), 1);
//! assert!(!outcome.exhausted);
//! ```

pub mod batch;
pub mod constraint;
pub mod source;

pub use constraint::{Constraint, ConstraintSet, RejectionTally};
pub use source::{CandidateSource, ScriptedSource, UniformSource};

use crate::archive::{check_shape, Draw, HistoricalArchive};
use crate::config::SamplingConfig;
use crate::enrich::{enrich, GeneratedDraw};
use crate::error::{DrawError, DrawResult};
use crate::stats::SumStatistics;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Transient per-run state, owned by a single run
#[derive(Debug, Clone, Default)]
pub struct SamplerState {
    accepted: Vec<GeneratedDraw>,
    previous_accepted: Option<Draw>,
    attempts_used: u64,
}

impl SamplerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted(&self) -> &[GeneratedDraw] {
        &self.accepted
    }

    /// Last accepted draw of this run, the disjointness anchor
    pub fn previous_accepted(&self) -> Option<&Draw> {
        self.previous_accepted.as_ref()
    }

    pub fn attempts_used(&self) -> u64 {
        self.attempts_used
    }

    pub(crate) fn accept(&mut self, draw: Draw) {
        self.accepted.push(enrich(&draw));
        self.previous_accepted = Some(draw);
    }
}

/// Result of one sampling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Accepted draws in acceptance order
    pub draws: Vec<GeneratedDraw>,
    pub attempts_used: u64,
    /// True if the run stopped before reaching `target_count`
    pub exhausted: bool,
    /// True if the run was stopped by a cancel flag or deadline
    pub cancelled: bool,
    pub rejections: RejectionTally,
}

impl GenerationOutcome {
    /// True when the full target count was reached
    pub fn is_complete(&self) -> bool {
        !self.exhausted
    }
}

/// Shared flag to stop a run from outside
///
/// A stopped run reports `exhausted = true`, exactly like natural exhaustion.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Rejection-sampling engine over an injected candidate source
pub struct DrawSampler<S: CandidateSource = UniformSource> {
    source: S,
    constraints: ConstraintSet,
    cancel: Option<CancelFlag>,
    deadline: Option<Instant>,
}

impl<S: CandidateSource> DrawSampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            constraints: ConstraintSet::standard(),
            cancel: None,
            deadline: None,
        }
    }

    /// Stop early once `flag` is set
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Stop early once `deadline` has passed
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the sampler until the target count or the attempt ceiling is reached
    ///
    /// # Errors
    ///
    /// - `DrawError::Configuration` for an impossible `(k, N)`, a zero
    ///   `target_count`, or a config that does not match the archive
    /// - `DrawError::InvalidCandidate` if the source yields a malformed draw
    ///
    /// A zero `max_attempts` is not an error: the run is immediately exhausted.
    pub fn run(
        &mut self,
        archive: &HistoricalArchive,
        stats: &SumStatistics,
        config: &SamplingConfig,
    ) -> DrawResult<GenerationOutcome> {
        check_run_config(archive, config)?;

        let draw_size = config.draw_size;
        let max_number = config.max_number;
        let mut state = SamplerState::new();
        let mut rejections = RejectionTally::default();
        let mut cancelled = false;

        while state.accepted.len() < config.target_count && state.attempts_used < config.max_attempts {
            if self.should_stop() {
                cancelled = true;
                break;
            }

            let Some(values) = self.source.next_candidate(draw_size, max_number) else {
                debug!(attempts = state.attempts_used, "candidate source ran dry");
                break;
            };
            state.attempts_used += 1;

            let candidate = Draw::new(&values, draw_size, max_number)?;
            match self.constraints.first_violation(&candidate, &state, stats, archive) {
                None => {
                    debug!(attempt = state.attempts_used, draw = %candidate, "accepted");
                    state.accept(candidate);
                }
                Some(constraint) => rejections.record(constraint),
            }
        }

        let exhausted = state.accepted.len() < config.target_count;
        info!(
            accepted = state.accepted.len(),
            target = config.target_count,
            attempts = state.attempts_used,
            exhausted,
            cancelled,
            "sampling run finished"
        );

        Ok(GenerationOutcome {
            draws: state.accepted,
            attempts_used: state.attempts_used,
            exhausted,
            cancelled,
            rejections,
        })
    }

    fn should_stop(&self) -> bool {
        self.cancel.as_ref().map_or(false, CancelFlag::is_cancelled)
            || self.deadline.map_or(false, |d| Instant::now() >= d)
    }
}

/// Generate draws with a uniform source seeded from `config.seed`
///
/// Without a configured seed the source is seeded from entropy.
pub fn generate(
    archive: &HistoricalArchive,
    stats: &SumStatistics,
    config: &SamplingConfig,
) -> DrawResult<GenerationOutcome> {
    let source = match config.seed {
        Some(seed) => UniformSource::with_seed(seed),
        None => UniformSource::new(),
    };
    DrawSampler::new(source).run(archive, stats, config)
}

fn check_run_config(archive: &HistoricalArchive, config: &SamplingConfig) -> DrawResult<()> {
    check_shape(config.draw_size, config.max_number)?;

    if config.target_count == 0 {
        return Err(DrawError::config("target_count must be at least 1"));
    }

    if config.draw_size != archive.draw_size() || config.max_number != archive.max_number() {
        return Err(DrawError::config(format!(
            "sampling config (k={}, N={}) does not match archive (k={}, N={})",
            config.draw_size,
            config.max_number,
            archive.draw_size(),
            archive.max_number()
        )));
    }

    Ok(())
}
