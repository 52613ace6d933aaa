use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snorescope::config::AppConfig;
use snorescope::fixtures::{ExpectationDiff, FixtureCatalog, RecordingFixture};
use snorescope::report::RecordingSummary;
use snorescope::SoundEventDetector;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "snorescope_cli",
    about = "Offline sound-event analysis harness for overnight recordings"
)]
struct Cli {
    /// Override directory containing fixture assets (defaults to fixtures/)
    #[arg(long)]
    fixtures_dir: Option<PathBuf>,
    /// Optional detector config JSON; defaults apply when absent
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a fixture and optionally compare against expectations
    Analyze {
        #[arg(long)]
        fixture: String,
        #[arg(long)]
        expect: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the plain-text sleep report for a fixture
    Report {
        #[arg(long)]
        fixture: String,
    },
    /// List available fixtures on disk
    DumpFixtures,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let catalog = cli
        .fixtures_dir
        .map(FixtureCatalog::new)
        .unwrap_or_default();
    let config = cli
        .config
        .map(AppConfig::load_from_file)
        .unwrap_or_default();
    let detector = SoundEventDetector::with_config(config.detector);

    match cli.command {
        Commands::Analyze {
            fixture,
            expect,
            output,
        } => run_analyze(&catalog, &detector, &fixture, expect, output),
        Commands::Report { fixture } => run_report(&catalog, &detector, &fixture),
        Commands::DumpFixtures => run_dump(&catalog),
    }
}

fn run_analyze(
    catalog: &FixtureCatalog,
    detector: &SoundEventDetector,
    fixture: &str,
    override_expect: Option<PathBuf>,
    output_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let data = catalog.load(fixture, override_expect)?;
    let result = analyze_fixture(detector, &data);

    tracing::info!(
        fixture = %data.metadata.name,
        events = result.events.len(),
        snore_score = result.snore_score,
        "analysis finished"
    );

    let report = serde_json::json!({
        "fixture": data.metadata.name,
        "duration_secs": data.duration_secs,
        "snore_score": result.snore_score,
        "events": &result.events,
    });
    let rendered = serde_json::to_string_pretty(&report)?;
    match output_path {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => println!("{rendered}"),
    }

    if let Some(expectations) = data.expectations {
        match expectations.verify(&result) {
            Ok(()) => Ok(ExitCode::from(0)),
            Err(diff) => {
                emit_diff(&diff)?;
                Ok(ExitCode::from(2))
            }
        }
    } else {
        Ok(ExitCode::from(0))
    }
}

fn run_report(
    catalog: &FixtureCatalog,
    detector: &SoundEventDetector,
    fixture: &str,
) -> Result<ExitCode> {
    let data = catalog.load(fixture, None)?;
    let result = analyze_fixture(detector, &data);
    let summary = RecordingSummary::new(
        &data.samples,
        data.duration_secs,
        data.start_epoch_secs,
        &result,
    );

    print!("{}", summary.render_text());
    Ok(ExitCode::from(0))
}

fn run_dump(catalog: &FixtureCatalog) -> Result<ExitCode> {
    let fixtures = catalog.discover()?;
    if fixtures.is_empty() {
        println!("No fixtures found in {}", catalog.root().display());
        return Ok(ExitCode::from(0));
    }

    for fixture in fixtures {
        let expectation = match fixture.expect_path {
            Some(_) => "with expectations",
            None => "no expectations",
        };
        println!("{} ({expectation})", fixture.name);
    }
    Ok(ExitCode::from(0))
}

fn analyze_fixture(
    detector: &SoundEventDetector,
    data: &RecordingFixture,
) -> snorescope::AnalysisResult {
    detector.analyze(&data.samples, data.duration_secs)
}

fn emit_diff(diff: &ExpectationDiff) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&diff.to_json())?;
    eprintln!("Expectation mismatches:\n{rendered}");
    Ok(())
}
