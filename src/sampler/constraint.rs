//! Acceptance constraints
//!
//! Each constraint is a pure predicate over a candidate draw, the sampler
//! state, the sum statistics and the archive. A candidate is accepted only if
//! every constraint holds. Evaluation order only affects cost, so
//! [`ConstraintSet`] runs the cheap arithmetic checks before the archive
//! lookup.

use super::SamplerState;
use crate::archive::{Draw, HistoricalArchive};
use crate::stats::SumStatistics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single acceptance rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// No two values share the same last digit
    LastDigitUnique,
    /// Sum lies within `mean ± std_dev`, inclusive
    SumWindow,
    /// No value shared with the previously accepted draw of this run
    SequentialDisjoint,
    /// Not equal, as a set, to any historical draw
    Novelty,
}

impl Constraint {
    /// All constraints, cheapest first
    pub const ALL: [Constraint; 4] = [
        Constraint::LastDigitUnique,
        Constraint::SumWindow,
        Constraint::SequentialDisjoint,
        Constraint::Novelty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Constraint::LastDigitUnique => "last_digit_unique",
            Constraint::SumWindow => "sum_window",
            Constraint::SequentialDisjoint => "sequential_disjoint",
            Constraint::Novelty => "novelty",
        }
    }

    /// Evaluate this constraint against `candidate`
    pub fn check(
        &self,
        candidate: &Draw,
        state: &SamplerState,
        stats: &SumStatistics,
        archive: &HistoricalArchive,
    ) -> bool {
        match self {
            Constraint::LastDigitUnique => last_digits_unique(candidate),
            Constraint::SumWindow => stats.contains(candidate.sum()),
            Constraint::SequentialDisjoint => {
                // Vacuously true before the first acceptance
                state
                    .previous_accepted()
                    .map_or(true, |prev| candidate.is_disjoint(prev))
            }
            Constraint::Novelty => !archive.contains(candidate),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// True if no two values are congruent modulo 10
pub fn last_digits_unique(draw: &Draw) -> bool {
    let mut seen = [false; 10];
    for &n in draw.numbers() {
        let digit = (n % 10) as usize;
        if seen[digit] {
            return false;
        }
        seen[digit] = true;
    }
    true
}

/// Conjunction of constraints, evaluated in order with short-circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    /// The full rule set in cost order
    pub fn standard() -> Self {
        Self {
            constraints: Constraint::ALL.to_vec(),
        }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// First constraint `candidate` violates, or `None` if it passes all
    pub fn first_violation(
        &self,
        candidate: &Draw,
        state: &SamplerState,
        stats: &SumStatistics,
        archive: &HistoricalArchive,
    ) -> Option<Constraint> {
        self.constraints
            .iter()
            .copied()
            .find(|c| !c.check(candidate, state, stats, archive))
    }

    pub fn accepts(
        &self,
        candidate: &Draw,
        state: &SamplerState,
        stats: &SumStatistics,
        archive: &HistoricalArchive,
    ) -> bool {
        self.first_violation(candidate, state, stats, archive).is_none()
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-constraint rejection counts
///
/// Each rejected candidate is charged to the first constraint it failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionTally {
    pub last_digit_unique: u64,
    pub sum_window: u64,
    pub sequential_disjoint: u64,
    pub novelty: u64,
}

impl RejectionTally {
    pub fn record(&mut self, constraint: Constraint) {
        *self.slot(constraint) += 1;
    }

    pub fn get(&self, constraint: Constraint) -> u64 {
        match constraint {
            Constraint::LastDigitUnique => self.last_digit_unique,
            Constraint::SumWindow => self.sum_window,
            Constraint::SequentialDisjoint => self.sequential_disjoint,
            Constraint::Novelty => self.novelty,
        }
    }

    pub fn total(&self) -> u64 {
        self.last_digit_unique + self.sum_window + self.sequential_disjoint + self.novelty
    }

    /// Add another tally into this one
    pub fn merge(&mut self, other: &RejectionTally) {
        for c in Constraint::ALL {
            *self.slot(c) += other.get(c);
        }
    }

    fn slot(&mut self, constraint: Constraint) -> &mut u64 {
        match constraint {
            Constraint::LastDigitUnique => &mut self.last_digit_unique,
            Constraint::SumWindow => &mut self.sum_window,
            Constraint::SequentialDisjoint => &mut self.sequential_disjoint,
            Constraint::Novelty => &mut self.novelty,
        }
    }
}
