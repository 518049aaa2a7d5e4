//! Historical draw ingestion
//!
//! Reads a delimited file with a header row and turns each data row into a
//! [`RawRecord`]. Number and date columns are picked by the names given in
//! [`InputConfig`]; nothing is guessed. Cell contents are left as text for
//! the archive to validate, so a bad cell only costs its row.

use crate::archive::RawRecord;
use crate::config::InputConfig;
use crate::Result;
use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::Read;
use tracing::{debug, warn};

/// Date formats tried when none is configured
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Rows read from an input file
#[derive(Debug, Clone, Default)]
pub struct IngestedRecords {
    pub records: Vec<RawRecord>,
    /// Rows the CSV reader could not decode at all
    pub unreadable: usize,
}

/// Read historical records from the configured input file
pub fn read_records(input: &InputConfig) -> Result<IngestedRecords> {
    let path = input
        .path
        .as_ref()
        .context("no input file configured")?;
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    records_from_reader(file, input)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

/// Read historical records from any reader
pub fn records_from_reader<R: Read>(reader: R, input: &InputConfig) -> Result<IngestedRecords> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(input.delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read header row")?.clone();
    let find = |name: &str| -> Result<usize> {
        headers.iter().position(|h| h == name).with_context(|| {
            format!(
                "column '{}' not found; available columns: {}",
                name,
                headers.iter().collect::<Vec<_>>().join(", ")
            )
        })
    };

    let number_idx = input
        .number_columns
        .iter()
        .map(|name| find(name))
        .collect::<Result<Vec<usize>>>()?;
    let date_idx = input.date_column.as_deref().map(find).transpose()?;

    let mut out = IngestedRecords::default();
    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!(row, error = %e, "unreadable input row");
                out.unreadable += 1;
                continue;
            }
        };

        // Short rows yield fewer values and are rejected by the archive
        let values: Vec<String> = number_idx
            .iter()
            .filter_map(|&i| record.get(i))
            .map(str::to_string)
            .collect();

        let date = date_idx
            .and_then(|i| record.get(i))
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| {
                let parsed = parse_date(raw, input.date_format.as_deref());
                if parsed.is_none() {
                    debug!(row, raw, "unparsable draw date, row left undated");
                }
                parsed
            });

        out.records.push(RawRecord { values, date });
    }

    if out.unreadable > 0 {
        warn!(unreadable = out.unreadable, "input rows could not be decoded");
    }

    Ok(out)
}

/// Parse a draw date with `format`, or with the common formats when `None`
///
/// Timestamps such as `2024-01-05 00:00:00` are accepted and truncated to the date.
pub fn parse_date(raw: &str, format: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.trim();
    match format {
        Some(fmt) => NaiveDate::parse_from_str(raw, fmt).ok(),
        None => DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn input(columns: &[&str], date: Option<&str>) -> InputConfig {
        InputConfig {
            number_columns: columns.iter().map(|c| c.to_string()).collect(),
            date_column: date.map(str::to_string),
            ..InputConfig::default()
        }
    }

    #[test]
    fn test_reads_named_columns_in_any_order() {
        let data = "Draw Date,Num3,Bonus,Num1,Num2\n2024-01-05,30,7,10,20\n2024-01-12, 3 ,8,1,2\n";
        let out = records_from_reader(data.as_bytes(), &input(&["Num1", "Num2", "Num3"], Some("Draw Date"))).unwrap();

        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].values, vec!["10", "20", "30"]);
        assert_eq!(out.records[1].values, vec!["1", "2", "3"]);
        assert_eq!(out.records[0].date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(out.unreadable, 0);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "A,B\n1,2\n";
        let err = records_from_reader(data.as_bytes(), &input(&["A", "C"], None)).unwrap_err();
        assert!(format!("{:#}", err).contains("column 'C' not found"));
    }

    #[test]
    fn test_short_rows_keep_partial_values() {
        let data = "A,B,C\n1,2\n4,5,6\n";
        let out = records_from_reader(data.as_bytes(), &input(&["A", "B", "C"], None)).unwrap();
        assert_eq!(out.records[0].values.len(), 2);
        assert_eq!(out.records[1].values.len(), 3);
    }

    #[test]
    fn test_custom_delimiter_and_bad_dates() {
        let data = "A;B;When\n1;2;not a date\n3;4;\n";
        let mut cfg = input(&["A", "B"], Some("When"));
        cfg.delimiter = ';';

        let out = records_from_reader(data.as_bytes(), &cfg).unwrap();
        assert_eq!(out.records.len(), 2);
        assert!(out.records.iter().all(|r| r.date.is_none()));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_date("2024-03-15", None), expected);
        assert_eq!(parse_date("03/15/2024", None), expected);
        assert_eq!(parse_date("15/03/2024", None), expected);
        assert_eq!(parse_date("2024-03-15 00:00:00", None), expected);
        assert_eq!(parse_date("15 Mar 2024", Some("%d %b %Y")), expected);
        assert_eq!(parse_date("2024-03-15", Some("%d %b %Y")), None);
    }

    #[test]
    fn test_read_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "N1,N2,N3").unwrap();
        writeln!(file, "5,6,7").unwrap();

        let mut cfg = input(&["N1", "N2", "N3"], None);
        cfg.path = Some(file.path().to_path_buf());
        let out = read_records(&cfg).unwrap();
        assert_eq!(out.records.len(), 1);

        cfg.path = Some(PathBuf::from("/nonexistent/draws.csv"));
        assert!(read_records(&cfg).is_err());
    }
}
