//! Human-readable text output

use crate::archive::HistoricalArchive;
use crate::pipeline::RunReport;
use crate::sampler::Constraint;
use crate::stats::frequency::{cold_numbers, days_since_last_seen, hot_numbers, top_pairs};
use crate::stats::SumStatistics;

/// Print generation results to console
///
/// Displays:
/// - Run summary (accepted / target, attempts, completion)
/// - Sum window derived from the archive
/// - Every generated draw with its derived metrics
/// - Rejection breakdown per constraint
pub fn print_results(report: &RunReport) {
    let s = &report.summary;

    println!("═══════════════════════════════════════════════════════════");
    println!("                    GENERATED DRAWS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    print_statistics(&report.statistics);
    println!();

    for batch in &report.batches {
        if report.batches.len() > 1 {
            println!("Batch {} (seed {}):", batch.batch, batch.seed);
        }
        for (i, draw) in batch.outcome.draws.iter().enumerate() {
            let numbers: Vec<String> = draw.numbers.iter().map(|n| format!("{:>2}", n)).collect();
            let gaps: Vec<String> = draw.gaps.iter().map(u32::to_string).collect();
            println!(
                "  #{:<3} {}  sum={:<4} odd/even={}/{}  gaps={}  triangular={}",
                i + 1,
                numbers.join(" "),
                draw.sum,
                draw.odd_count,
                draw.even_count,
                gaps.join("-"),
                draw.triangular_count
            );
        }
    }
    println!();

    println!("Run:");
    println!("  Accepted:   {} / {}", s.accepted, s.target_count * s.batches);
    println!("  Attempts:   {}", format_number(s.attempts_used));
    println!("  Seed:       {}", s.seed);
    if s.skipped_input_rows > 0 {
        println!("  Skipped input rows: {}", s.skipped_input_rows);
    }
    if s.exhausted {
        let reason = if s.cancelled { "time limit or cancellation" } else { "attempt ceiling" };
        println!("  Status:     PARTIAL ({} reached)", reason);
    } else {
        println!("  Status:     complete");
    }
    println!();

    println!("Rejections:");
    for c in Constraint::ALL {
        println!("  {:<20} {}", c.name(), format_number(s.rejections.get(c)));
    }
}

/// Print the sum statistics and acceptance window
pub fn print_statistics(stats: &SumStatistics) {
    println!("Historical sums ({} draws):", stats.sample_size);
    println!("  Mean:    {:.2}", stats.mean);
    println!("  Std dev: {:.2}", stats.std_dev);
    println!("  Window:  [{:.2}, {:.2}]", stats.lower(), stats.upper());
    if stats.is_low_diversity() {
        println!("  Warning: all historical sums are identical; generated draws must match that sum exactly");
    }
}

/// Print frequency, pair and recency reports for the archive
pub fn print_analysis(archive: &HistoricalArchive, top_n: usize) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    ARCHIVE ANALYSIS");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Draws: {} (k={}, N={})", archive.len(), archive.draw_size(), archive.max_number());
    println!();

    println!("Hot numbers (most frequent):");
    for c in hot_numbers(archive, top_n) {
        println!("  {:>3}  {}", c.number, c.count);
    }
    println!();

    println!("Cold numbers (least frequent):");
    for c in cold_numbers(archive, top_n) {
        println!("  {:>3}  {}", c.number, c.count);
    }
    println!();

    println!("Most common pairs:");
    for p in top_pairs(archive, top_n) {
        println!("  {:>3} & {:<3} {}", p.low, p.high, p.count);
    }
    println!();

    let recency = days_since_last_seen(archive);
    if recency.is_empty() {
        println!("Gap analysis: no draw dates available");
        return;
    }
    println!("Gap analysis (days since last seen):");
    for r in recency.iter().take(top_n) {
        match r.days {
            Some(days) => println!("  {:>3}  {} days", r.number, days),
            None => println!("  {:>3}  never", r.number),
        }
    }
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
