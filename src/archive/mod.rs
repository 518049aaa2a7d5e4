//! Historical draw archive
//!
//! The archive is built once from normalized input records and is read-only
//! afterwards. It is shared by the statistics estimator, the novelty check and
//! the frequency reports, and is safe to share across threads.
//!
//! # Validation policy
//!
//! Each record must resolve to exactly `k` integers in `[1, N]` with no
//! repeats. Records failing that are skipped and counted; the build only fails
//! when nothing valid remains.
//!
//! # Example
//!
//! ```
//! use drawgen::archive::{HistoricalArchive, RawRecord};
//!
//! let records = vec![
//!     RawRecord::new(["5", "3", "1"]),
//!     RawRecord::new(["2", "4", "40"]), // out of range, skipped
//! ];
//! let (archive, skipped) = HistoricalArchive::build(records, 3, 39).unwrap();
//! assert_eq!(archive.len(), 1);
//! assert_eq!(skipped, 1);
//! assert_eq!(archive.draws().next().unwrap().numbers(), &[1, 3, 5]);
//! ```

pub mod draw;

pub use draw::Draw;

use crate::error::{DrawError, DrawResult, ValidationError};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// One normalized input row, before validation
///
/// `values` are the raw cells of the `k` number columns in whatever column
/// order the normalizer resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub values: Vec<String>,
    pub date: Option<NaiveDate>,
}

impl RawRecord {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            date: None,
        }
    }

    /// Record built from already-numeric values
    pub fn from_numbers(values: &[u32]) -> Self {
        Self::new(values.iter().map(|v| v.to_string()))
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// A validated historical draw with its optional draw date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedDraw {
    pub draw: Draw,
    pub date: Option<NaiveDate>,
}

/// Immutable collection of validated historical draws under one `(k, N)`
#[derive(Debug, Clone)]
pub struct HistoricalArchive {
    draw_size: usize,
    max_number: u32,
    entries: Vec<ArchivedDraw>,
    /// Set view of `entries` for order-independent membership checks
    index: HashSet<Draw>,
}

impl HistoricalArchive {
    /// Build an archive from raw records
    ///
    /// Returns the archive together with the number of skipped records.
    ///
    /// # Errors
    ///
    /// - `DrawError::Configuration` if `(draw_size, max_number)` cannot describe a draw
    /// - `DrawError::EmptyArchive` if no record survives validation
    pub fn build<I>(records: I, draw_size: usize, max_number: u32) -> DrawResult<(Self, usize)>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        check_shape(draw_size, max_number)?;

        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for (row, record) in records.into_iter().enumerate() {
            match parse_record(&record, draw_size, max_number) {
                Ok(draw) => entries.push(ArchivedDraw { draw, date: record.date }),
                Err(e) => {
                    debug!(row, error = %e, "skipping invalid input record");
                    skipped += 1;
                }
            }
        }

        if entries.is_empty() {
            return Err(DrawError::EmptyArchive { skipped });
        }
        if skipped > 0 {
            warn!(skipped, "input records skipped during validation");
        }

        let index = entries.iter().map(|e| e.draw.clone()).collect();
        info!(draws = entries.len(), skipped, draw_size, max_number, "historical archive built");

        Ok((
            Self {
                draw_size,
                max_number,
                entries,
                index,
            },
            skipped,
        ))
    }

    /// Draw size `k`
    pub fn draw_size(&self) -> usize {
        self.draw_size
    }

    /// Upper bound `N` of the number range
    pub fn max_number(&self) -> u32 {
        self.max_number
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ArchivedDraw] {
        &self.entries
    }

    pub fn draws(&self) -> impl Iterator<Item = &Draw> + '_ {
        self.entries.iter().map(|e| &e.draw)
    }

    /// Per-draw sums in archive order
    pub fn sums(&self) -> impl Iterator<Item = u64> + '_ {
        self.draws().map(Draw::sum)
    }

    /// True if `draw`, as a set of values, matches any historical draw
    pub fn contains(&self, draw: &Draw) -> bool {
        self.index.contains(draw)
    }

    /// Most recent draw date, if any draw is dated
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.entries.iter().filter_map(|e| e.date).max()
    }
}

/// Check that `draw_size` distinct values can be drawn from `[1, max_number]`
pub fn check_shape(draw_size: usize, max_number: u32) -> DrawResult<()> {
    if draw_size == 0 {
        return Err(DrawError::config("draw_size must be at least 1"));
    }
    if max_number == 0 {
        return Err(DrawError::config("max_number must be at least 1"));
    }
    if draw_size as u64 > u64::from(max_number) {
        return Err(DrawError::config(format!(
            "draw_size ({}) exceeds max_number ({})",
            draw_size, max_number
        )));
    }
    Ok(())
}

fn parse_record(record: &RawRecord, draw_size: usize, max_number: u32) -> Result<Draw, ValidationError> {
    if record.values.len() != draw_size {
        return Err(ValidationError::WrongLength {
            expected: draw_size,
            found: record.values.len(),
        });
    }

    let mut values = Vec::with_capacity(draw_size);
    for raw in &record.values {
        let value = parse_cell(raw)?;
        if value < 1 || value > i64::from(max_number) {
            return Err(ValidationError::OutOfRange { value, max: max_number });
        }
        values.push(value as u32);
    }

    Draw::new(&values, draw_size, max_number)
}

/// Parse a cell as an integer
///
/// Accepts `7`, ` 7 ` and integral floats such as `7.0`, which spreadsheet
/// exports commonly produce.
fn parse_cell(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(v);
    }

    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(ValidationError::NotAnInteger {
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[&str]) -> RawRecord {
        RawRecord::new(values.iter().copied())
    }

    #[test]
    fn test_build_sorts_and_counts_skips() {
        let records = vec![
            record(&["10", "2", "7"]),
            record(&["1", "2"]),        // too short
            record(&["1", "x", "3"]),   // not an integer
            record(&["1", "1", "3"]),   // duplicate
            record(&["0", "4", "5"]),   // out of range
            record(&["3.0", "9", "8"]), // integral float accepted
        ];

        let (archive, skipped) = HistoricalArchive::build(records, 3, 10).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(skipped, 4);

        let draws: Vec<&[u32]> = archive.draws().map(|d| d.numbers()).collect();
        assert_eq!(draws, vec![&[2, 7, 10][..], &[3, 8, 9][..]]);
    }

    #[test]
    fn test_build_empty_archive() {
        let records = vec![record(&["1", "2", "99"])];
        let err = HistoricalArchive::build(records, 3, 10).unwrap_err();
        assert_eq!(err, DrawError::EmptyArchive { skipped: 1 });

        let err = HistoricalArchive::build(Vec::new(), 3, 10).unwrap_err();
        assert_eq!(err, DrawError::EmptyArchive { skipped: 0 });
    }

    #[test]
    fn test_build_rejects_impossible_shape() {
        let records = vec![RawRecord::from_numbers(&[1, 2, 3])];
        assert!(matches!(
            HistoricalArchive::build(records.clone(), 6, 5),
            Err(DrawError::Configuration(_))
        ));
        assert!(matches!(
            HistoricalArchive::build(records, 0, 5),
            Err(DrawError::Configuration(_))
        ));
    }

    #[test]
    fn test_contains_is_order_independent() {
        let (archive, _) =
            HistoricalArchive::build(vec![RawRecord::from_numbers(&[9, 1, 5])], 3, 10).unwrap();
        assert!(archive.contains(&Draw::new(&[5, 9, 1], 3, 10).unwrap()));
        assert!(!archive.contains(&Draw::new(&[5, 9, 2], 3, 10).unwrap()));
    }

    #[test]
    fn test_latest_date() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let records = vec![
            RawRecord::from_numbers(&[1, 2, 3]).with_date(d2),
            RawRecord::from_numbers(&[4, 5, 6]).with_date(d1),
            RawRecord::from_numbers(&[7, 8, 9]),
        ];
        let (archive, _) = HistoricalArchive::build(records, 3, 10).unwrap();
        assert_eq!(archive.latest_date(), Some(d2));
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(" 12 "), Ok(12));
        assert_eq!(parse_cell("12.0"), Ok(12));
        assert_eq!(parse_cell("-3"), Ok(-3));
        assert!(parse_cell("12.5").is_err());
        assert!(parse_cell("").is_err());
        assert!(parse_cell("NaN").is_err());
    }
}
