//! Derived per-draw metrics
//!
//! Turns an accepted [`Draw`] into a [`GeneratedDraw`] carrying the fields
//! shown to users and written to exports.

use crate::archive::Draw;
use serde::{Deserialize, Serialize};

/// An accepted draw plus its derived metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDraw {
    /// Values in ascending order
    pub numbers: Vec<u32>,
    pub sum: u64,
    pub odd_count: usize,
    pub even_count: usize,
    /// Differences between adjacent values, length `k - 1`
    pub gaps: Vec<u32>,
    /// How many values are triangular numbers
    pub triangular_count: usize,
}

/// Compute the derived metrics for `draw`
pub fn enrich(draw: &Draw) -> GeneratedDraw {
    let numbers = draw.numbers().to_vec();
    let odd_count = numbers.iter().filter(|&&n| n % 2 == 1).count();

    GeneratedDraw {
        sum: draw.sum(),
        odd_count,
        even_count: numbers.len() - odd_count,
        gaps: numbers.windows(2).map(|w| w[1] - w[0]).collect(),
        triangular_count: numbers.iter().filter(|&&n| is_triangular(n)).count(),
        numbers,
    }
}

/// True if `v = m(m+1)/2` for some positive integer `m`
///
/// Inverts with `m = (sqrt(8v + 1) - 1) / 2` and confirms the candidate in
/// integer arithmetic so float rounding cannot produce false answers.
pub fn is_triangular(v: u32) -> bool {
    if v == 0 {
        return false;
    }
    let v = u64::from(v);
    let m = ((((8 * v + 1) as f64).sqrt() - 1.0) / 2.0).round() as u64;
    m > 0 && m * (m + 1) / 2 == v
}
