//! drawgen CLI entry point

use anyhow::{Context, Result};
use drawgen::config::cli::{Cli, ExecutionMode};
use drawgen::config::{cli_convert, toml, validator, Config};
use drawgen::output::{csv, json, text};
use drawgen::{ingest, pipeline};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;
    setup_logging(&cli);

    let config = build_config(&cli)?;

    if cli.mode == ExecutionMode::Analyze {
        return run_analyze(&config, cli.dry_run);
    }

    validator::validate_config(&config).context("Configuration validation failed")?;

    let ingested = ingest::read_records(&config.input)?;
    let prepared = pipeline::prepare(ingested.records, ingested.unreadable, &config.sampling)
        .context("Failed to prepare historical archive")?;

    print_banner(&config);

    if cli.dry_run {
        if !config.output.quiet {
            text::print_statistics(&prepared.statistics);
            println!();
            println!("Dry run mode - configuration and input validated successfully");
        }
        return Ok(());
    }

    run_generate(&config, &prepared)
}

/// Report on the archive alone; needs neither sum statistics nor sampling limits
fn run_analyze(config: &Config, dry_run: bool) -> Result<()> {
    validator::validate_analysis(config).context("Configuration validation failed")?;

    let ingested = ingest::read_records(&config.input)?;
    let (archive, skipped) = pipeline::load_archive(
        ingested.records,
        ingested.unreadable,
        config.sampling.draw_size,
        config.sampling.max_number,
    )
    .context("Failed to load historical archive")?;
    info!(draws = archive.len(), skipped, "archive loaded");

    print_banner(config);

    if config.output.quiet {
        return Ok(());
    }
    if dry_run {
        println!("Dry run mode - configuration and input validated successfully");
    } else {
        text::print_analysis(&archive, config.output.top_n);
    }
    Ok(())
}

fn print_banner(config: &Config) {
    if !config.output.quiet {
        println!("drawgen v{}", env!("CARGO_PKG_VERSION"));
        println!();
    }
}

/// Generate draws and write all configured outputs
fn run_generate(config: &Config, prepared: &pipeline::Prepared) -> Result<()> {
    let report = pipeline::generate(prepared, &config.sampling, None).context("Generation failed")?;

    if !config.output.quiet {
        text::print_results(&report);
    }

    if let Some(ref path) = config.output.csv {
        csv::write_draws(path, &report, config.sampling.draw_size)?;
        info!(path = %path.display(), "CSV written");
    }
    if let Some(ref path) = config.output.json {
        json::write_report(path, &report, &config.sampling, true)?;
        info!(path = %path.display(), "JSON report written");
    }

    Ok(())
}

/// Load the config file if given, then apply CLI overrides
fn build_config(cli: &Cli) -> Result<Config> {
    match cli.config {
        Some(ref path) => {
            let config = toml::parse_toml_file(path)?;
            toml::merge_cli_with_config(cli, config)
        }
        None => cli_convert::build_config_from_cli(cli),
    }
}

fn setup_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to install log subscriber: {}", e);
    }
}
