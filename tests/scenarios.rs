use drawgen::archive::{Draw, HistoricalArchive, RawRecord};
use drawgen::config::{validator, InputConfig, OutputConfig, SamplingConfig};
use drawgen::sampler::constraint::last_digits_unique;
use drawgen::sampler::{DrawSampler, ScriptedSource};
use drawgen::{ingest, output, pipeline, sampler, stats, Config, DrawError};
use std::fs;
use std::process::Command;

fn three_row_archive() -> HistoricalArchive {
    let records = vec![
        RawRecord::from_numbers(&[1, 2, 3, 4, 5]),
        RawRecord::from_numbers(&[10, 20, 30, 35, 39]),
        RawRecord::from_numbers(&[5, 15, 25, 35, 36]),
    ];
    HistoricalArchive::build(records, 5, 39).unwrap().0
}

#[test]
fn single_draw_from_three_row_archive() {
    let archive = three_row_archive();
    let stats = stats::estimate(&archive).unwrap();
    assert!((stats.mean - 88.333).abs() < 1e-2);

    let config = SamplingConfig::new(5, 39, 1, 20_000).with_seed(42);
    let outcome = sampler::generate(&archive, &stats, &config).unwrap();

    assert_eq!(outcome.draws.len(), 1);
    assert!(!outcome.exhausted);

    let g = &outcome.draws[0];
    assert!(stats.contains(g.sum));
    let draw = Draw::new(&g.numbers, 5, 39).unwrap();
    assert!(last_digits_unique(&draw));
    assert!(!archive.contains(&draw));
}

#[test]
fn one_row_archive_has_insufficient_data() {
    let records = vec![RawRecord::from_numbers(&[1, 2, 3, 4, 5])];
    let (archive, _) = HistoricalArchive::build(records, 5, 39).unwrap();
    assert_eq!(
        stats::estimate(&archive).unwrap_err(),
        DrawError::InsufficientData { draws: 1 }
    );
}

#[test]
fn zero_attempts_is_immediately_exhausted() {
    let archive = three_row_archive();
    let stats = stats::estimate(&archive).unwrap();
    let config = SamplingConfig::new(5, 39, 3, 0).with_seed(1);

    let outcome = sampler::generate(&archive, &stats, &config).unwrap();
    assert!(outcome.draws.is_empty());
    assert_eq!(outcome.attempts_used, 0);
    assert!(outcome.exhausted);
}

#[test]
fn draw_size_above_range_fails_before_sampling() {
    let archive = three_row_archive();
    let stats = stats::estimate(&archive).unwrap();
    let config = SamplingConfig::new(40, 39, 1, 100);

    let mut sampler = DrawSampler::new(ScriptedSource::new(vec![vec![1, 2, 3, 4, 5]]));
    let err = sampler.run(&archive, &stats, &config).unwrap_err();
    assert!(matches!(err, DrawError::Configuration(_)));
    assert_eq!(sampler.source().remaining(), 1);

    assert!(matches!(config.validate(), Err(DrawError::Configuration(_))));
}

fn write_history(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("history.csv");
    fs::write(
        &path,
        "Draw Date,Num1,Num2,Num3,Num4,Num5\n\
         2024-01-02,1,2,3,4,5\n\
         2024-01-09,10,20,30,35,39\n\
         2024-01-16,5,15,25,35,36\n\
         2024-01-23,7,14,21,28,38\n\
         2024-01-30,3,3,9,11,12\n\
         2024-02-06,8,17,x,22,31\n",
    )
    .unwrap();
    path
}

#[test]
fn file_to_exports_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = write_history(dir.path());
    let csv_path = dir.path().join("generated.csv");
    let json_path = dir.path().join("report.json");

    let mut sampling = SamplingConfig::new(5, 39, 4, 50_000).with_seed(2024);
    sampling.batches = 2;
    let config = Config {
        sampling,
        input: InputConfig {
            path: Some(input_path),
            number_columns: (1..=5).map(|i| format!("Num{}", i)).collect(),
            date_column: Some("Draw Date".to_string()),
            ..InputConfig::default()
        },
        output: OutputConfig {
            csv: Some(csv_path.clone()),
            json: Some(json_path.clone()),
            ..OutputConfig::default()
        },
    };
    validator::validate_config(&config).unwrap();

    let ingested = ingest::read_records(&config.input).unwrap();
    assert_eq!(ingested.records.len(), 6);

    let prepared = pipeline::prepare(ingested.records, ingested.unreadable, &config.sampling).unwrap();
    assert_eq!(prepared.archive.len(), 4);
    assert_eq!(prepared.skipped_input_rows, 2);

    let report = pipeline::generate(&prepared, &config.sampling, None).unwrap();
    assert_eq!(report.summary.accepted, 8);
    assert_eq!(report.summary.skipped_input_rows, 2);

    output::csv::write_draws(&csv_path, &report, 5).unwrap();
    output::json::write_report(&json_path, &report, &config.sampling, false).unwrap();

    let csv_text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_text.lines().count(), 9);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["summary"]["accepted"], 8);
    assert_eq!(json["summary"]["exhausted"], false);
}

#[test]
fn cli_generates_csv() {
    let exe = env!("CARGO_BIN_EXE_drawgen");
    let dir = tempfile::tempdir().unwrap();
    let input_path = write_history(dir.path());
    let csv_path = dir.path().join("out.csv");

    let status = Command::new(exe)
        .args([
            input_path.to_str().unwrap(),
            "--columns",
            "Num1,Num2,Num3,Num4,Num5",
            "--date-column",
            "Draw Date",
            "-k",
            "5",
            "-n",
            "39",
            "-t",
            "3",
            "-a",
            "20000",
            "--seed",
            "42",
            "--csv-output",
            csv_path.to_str().unwrap(),
            "--quiet",
        ])
        .status()
        .expect("drawgen failed to start");
    assert!(status.success());

    let text = fs::read_to_string(&csv_path).unwrap();
    assert!(text.starts_with("batch,index,n1,n2,n3,n4,n5,sum"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn cli_rejects_impossible_config() {
    let exe = env!("CARGO_BIN_EXE_drawgen");
    let dir = tempfile::tempdir().unwrap();
    let input_path = write_history(dir.path());

    let output = Command::new(exe)
        .args([
            input_path.to_str().unwrap(),
            "--columns",
            "Num1,Num2,Num3,Num4,Num5",
            "-k",
            "5",
            "-n",
            "4",
            "-a",
            "100",
        ])
        .output()
        .expect("drawgen failed to start");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds max_number"));
}

#[test]
fn cli_analyzes_single_row_archive() {
    let exe = env!("CARGO_BIN_EXE_drawgen");
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("one.csv");
    fs::write(&input_path, "Draw Date,Num1,Num2,Num3\n2024-03-05,4,9,17\n").unwrap();

    let output = Command::new(exe)
        .args([
            input_path.to_str().unwrap(),
            "--mode",
            "analyze",
            "--columns",
            "Num1,Num2,Num3",
            "--date-column",
            "Draw Date",
            "-k",
            "3",
            "-n",
            "20",
            "--top",
            "3",
        ])
        .output()
        .expect("drawgen failed to start");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ARCHIVE ANALYSIS"));
    assert!(stdout.contains("Draws: 1 (k=3, N=20)"));
    assert!(stdout.contains("Most common pairs:"));
}
