//! Descriptive frequency reports over the archive
//!
//! Counts how often each number and each unordered pair was drawn, and how
//! many days have passed since each number last appeared.

use crate::archive::HistoricalArchive;
use serde::Serialize;
use std::collections::HashMap;

/// Occurrence count for a single number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberCount {
    pub number: u32,
    pub count: usize,
}

/// Occurrence count for an unordered pair (`low < high`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairCount {
    pub low: u32,
    pub high: u32,
    pub count: usize,
}

/// Days since a number was last drawn
///
/// `days` is `None` when the number never appeared in a dated draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recency {
    pub number: u32,
    pub days: Option<i64>,
}

/// Occurrences of every value in `1..=N`, ascending by number
///
/// Values that never appeared are included with a count of zero.
pub fn number_frequency(archive: &HistoricalArchive) -> Vec<NumberCount> {
    let mut counts = vec![0usize; archive.max_number() as usize + 1];
    for draw in archive.draws() {
        for &n in draw.numbers() {
            counts[n as usize] += 1;
        }
    }

    (1..=archive.max_number())
        .map(|number| NumberCount {
            number,
            count: counts[number as usize],
        })
        .collect()
}

/// The `n` most frequently drawn numbers (ties go to the smaller number)
pub fn hot_numbers(archive: &HistoricalArchive, n: usize) -> Vec<NumberCount> {
    let mut freq = number_frequency(archive);
    freq.sort_by(|a, b| b.count.cmp(&a.count).then(a.number.cmp(&b.number)));
    freq.truncate(n);
    freq
}

/// The `n` least frequently drawn numbers (ties go to the smaller number)
pub fn cold_numbers(archive: &HistoricalArchive, n: usize) -> Vec<NumberCount> {
    let mut freq = number_frequency(archive);
    freq.sort_by(|a, b| a.count.cmp(&b.count).then(a.number.cmp(&b.number)));
    freq.truncate(n);
    freq
}

/// The `n` most common unordered pairs across all draws
pub fn top_pairs(archive: &HistoricalArchive, n: usize) -> Vec<PairCount> {
    let mut counts: HashMap<(u32, u32), usize> = HashMap::new();
    for draw in archive.draws() {
        let numbers = draw.numbers();
        for (i, &low) in numbers.iter().enumerate() {
            for &high in &numbers[i + 1..] {
                *counts.entry((low, high)).or_insert(0) += 1;
            }
        }
    }

    let mut pairs: Vec<PairCount> = counts
        .into_iter()
        .map(|((low, high), count)| PairCount { low, high, count })
        .collect();
    pairs.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.low.cmp(&b.low))
            .then(a.high.cmp(&b.high))
    });
    pairs.truncate(n);
    pairs
}

/// Days between the latest archive date and each number's last dated appearance
///
/// Sorted by gap, longest first; numbers never seen in a dated draw come last.
/// Returns an empty list when the archive carries no dates.
pub fn days_since_last_seen(archive: &HistoricalArchive) -> Vec<Recency> {
    let Some(latest) = archive.latest_date() else {
        return Vec::new();
    };

    let mut last_seen = vec![None; archive.max_number() as usize + 1];
    for entry in archive.entries() {
        let Some(date) = entry.date else { continue };
        for &n in entry.draw.numbers() {
            let slot = &mut last_seen[n as usize];
            if slot.map_or(true, |seen| date > seen) {
                *slot = Some(date);
            }
        }
    }

    let mut rows: Vec<Recency> = (1..=archive.max_number())
        .map(|number| Recency {
            number,
            days: last_seen[number as usize].map(|d| (latest - d).num_days()),
        })
        .collect();

    rows.sort_by(|a, b| match (a.days, b.days) {
        (Some(x), Some(y)) => y.cmp(&x).then(a.number.cmp(&b.number)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.number.cmp(&b.number),
    });
    rows
}
