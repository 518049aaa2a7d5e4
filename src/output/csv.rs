//! CSV output formatting
//!
//! One row per generated draw, flat columns only:
//!
//! `batch,index,n1..nk,sum,odd_count,even_count,gap_1..gap_{k-1},triangular_count`
//!
//! Suitable for spreadsheets, pandas and R.

use crate::pipeline::RunReport;
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row for draws of size `draw_size`
pub fn header(draw_size: usize) -> Vec<String> {
    let mut columns = vec!["batch".to_string(), "index".to_string()];
    columns.extend((1..=draw_size).map(|i| format!("n{}", i)));
    columns.extend(["sum", "odd_count", "even_count"].map(String::from));
    columns.extend((1..draw_size).map(|i| format!("gap_{}", i)));
    columns.push("triangular_count".to_string());
    columns
}

/// Write every draw in `report` to a CSV file
pub fn write_draws(path: &Path, report: &RunReport, draw_size: usize) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV output: {}", path.display()))?;
    write_draws_to(file, report, draw_size)
        .with_context(|| format!("Failed to write CSV output: {}", path.display()))
}

/// Write every draw in `report` as CSV to `writer`
pub fn write_draws_to<W: Write>(writer: W, report: &RunReport, draw_size: usize) -> Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(header(draw_size))?;

    for (batch, index, draw) in report.draws() {
        let mut row = vec![batch.to_string(), index.to_string()];
        row.extend(draw.numbers.iter().map(u32::to_string));
        row.push(draw.sum.to_string());
        row.push(draw.odd_count.to_string());
        row.push(draw.even_count.to_string());
        row.extend(draw.gaps.iter().map(u32::to_string));
        row.push(draw.triangular_count.to_string());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::RawRecord;
    use crate::config::SamplingConfig;
    use crate::pipeline;

    #[test]
    fn test_header() {
        assert_eq!(
            header(3),
            vec!["batch", "index", "n1", "n2", "n3", "sum", "odd_count", "even_count", "gap_1", "gap_2", "triangular_count"]
        );
    }

    #[test]
    fn test_write_draws_rows_match_report() {
        let records = vec![
            RawRecord::from_numbers(&[1, 2, 3]),
            RawRecord::from_numbers(&[10, 20, 30]),
            RawRecord::from_numbers(&[5, 15, 27]),
        ];
        let config = SamplingConfig::new(3, 30, 3, 10_000).with_seed(3);
        let report = pipeline::run(records, &config).unwrap();

        let mut buf = Vec::new();
        write_draws_to(&mut buf, &report, 3).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + report.summary.accepted);
        let first = report.batches[0].outcome.draws[0].clone();
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[0], "0");
        assert_eq!(fields[1], "0");
        assert_eq!(fields[2], first.numbers[0].to_string());
        assert_eq!(fields[5], first.sum.to_string());
        assert_eq!(fields[10], first.triangular_count.to_string());
    }

    #[test]
    fn test_write_draws_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draws.csv");

        let records = vec![
            RawRecord::from_numbers(&[1, 2, 3]),
            RawRecord::from_numbers(&[10, 20, 30]),
        ];
        let config = SamplingConfig::new(3, 30, 2, 10_000).with_seed(8);
        let report = pipeline::run(records, &config).unwrap();

        write_draws(&path, &report, 3).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("batch,index,n1,n2,n3,sum"));

        let bad = dir.path().join("missing").join("draws.csv");
        assert!(write_draws(&bad, &report, 3).is_err());
    }
}
