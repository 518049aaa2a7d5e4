//! Draw value type
//!
//! A [`Draw`] is exactly `k` distinct integers in `[1, N]`, stored ascending.
//! The only constructor validates all of that, so everything downstream
//! (constraints, gap computation, novelty lookups) can rely on it.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ascending sequence of distinct values from `[1, N]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draw {
    numbers: Vec<u32>,
}

impl Draw {
    /// Validate and sort `values` into a draw of size `draw_size` over `[1, max_number]`
    ///
    /// Input order does not matter; the stored sequence is always ascending.
    pub fn new(values: &[u32], draw_size: usize, max_number: u32) -> Result<Self, ValidationError> {
        if values.len() != draw_size {
            return Err(ValidationError::WrongLength {
                expected: draw_size,
                found: values.len(),
            });
        }

        if let Some(&value) = values.iter().find(|&&v| v == 0 || v > max_number) {
            return Err(ValidationError::OutOfRange {
                value: i64::from(value),
                max: max_number,
            });
        }

        let mut numbers = values.to_vec();
        numbers.sort_unstable();
        if let Some(pair) = numbers.windows(2).find(|w| w[0] == w[1]) {
            return Err(ValidationError::Duplicate { value: pair[0] });
        }

        Ok(Self { numbers })
    }

    /// Values in ascending order
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Arithmetic sum of the values
    ///
    /// Widened to `u64` so `k` values near `u32::MAX` cannot overflow.
    pub fn sum(&self) -> u64 {
        self.numbers.iter().map(|&n| u64::from(n)).sum()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.numbers.binary_search(&value).is_ok()
    }

    /// True when the two draws share no value
    pub fn is_disjoint(&self, other: &Draw) -> bool {
        // Both sides are sorted, so a merge walk is enough
        let (mut i, mut j) = (0, 0);
        while i < self.numbers.len() && j < other.numbers.len() {
            match self.numbers[i].cmp(&other.numbers[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return false,
            }
        }
        true
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.numbers.iter().map(|n| n.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
