//! Candidate sources
//!
//! The sampler never touches a global RNG. Candidates come from an injected
//! [`CandidateSource`], so a fixed seed reproduces a run exactly and tests can
//! script the accept/reject sequence.
//!
//! # Example
//!
//! ```
//! use drawgen::sampler::source::{CandidateSource, UniformSource};
//!
//! let mut source = UniformSource::with_seed(7);
//! let values = source.next_candidate(5, 39).unwrap();
//! assert_eq!(values.len(), 5);
//! assert!(values.iter().all(|&v| (1..=39).contains(&v)));
//! ```

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::VecDeque;

/// Supplier of raw candidate draws
///
/// Sources must be `Send` so independent runs can execute on separate threads,
/// each owning its own source.
pub trait CandidateSource: Send {
    /// Produce `draw_size` distinct values from `[1, max_number]`, in any order
    ///
    /// Returns `None` when the source has nothing more to offer; the sampler
    /// treats that like running out of attempts.
    fn next_candidate(&mut self, draw_size: usize, max_number: u32) -> Option<Vec<u32>>;
}

/// Uniform sampling without replacement
///
/// Uses xoshiro256++, which is fast and seedable.
pub struct UniformSource {
    rng: Xoshiro256PlusPlus,
}

impl UniformSource {
    /// Create a source with a random seed
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Create a source with a specific seed
    ///
    /// The same seed always yields the same candidate sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateSource for UniformSource {
    fn next_candidate(&mut self, draw_size: usize, max_number: u32) -> Option<Vec<u32>> {
        // The sampler validates draw_size <= max_number before asking
        let picked = rand::seq::index::sample(&mut self.rng, max_number as usize, draw_size);
        Some(picked.into_iter().map(|i| i as u32 + 1).collect())
    }
}

/// Replays a fixed list of candidates, then runs dry
///
/// Used to drive the sampler through exact accept/reject sequences.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<Vec<u32>>,
}

impl ScriptedSource {
    pub fn new<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = Vec<u32>>,
    {
        Self {
            script: candidates.into_iter().collect(),
        }
    }

    /// Candidates not yet handed out
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl CandidateSource for ScriptedSource {
    fn next_candidate(&mut self, _draw_size: usize, _max_number: u32) -> Option<Vec<u32>> {
        self.script.pop_front()
    }
}

/// Derive an independent seed for stream `index` from a base seed
///
/// Index 0 maps to the base seed itself, so a single-batch run matches a plain
/// seeded run.
pub fn derive_seed(base: u64, index: u64) -> u64 {
    base ^ index.wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Draw a fresh seed from OS entropy
pub fn entropy_seed() -> u64 {
    use rand::RngCore;
    rand::rngs::OsRng.next_u64()
}
