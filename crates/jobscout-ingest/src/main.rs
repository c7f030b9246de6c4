//! jobscout - combined job portal collection CLI
//!
//! Runs the Jora and Seek collectors concurrently, merges their results
//! under one schema, and writes a single consolidated CSV artifact.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use jobscout_common::logging::{init_logging, LogConfig, LogLevel};
use jobscout_ingest::config::ScoutConfig;
use jobscout_ingest::dispatch::{dispatch_all, ProducerTask};
use jobscout_ingest::export::{write_csv, ArtifactSummary};
use jobscout_ingest::merge::consolidate;
use jobscout_ingest::portals::jora::JORA_SOURCE;
use jobscout_ingest::portals::seek::SEEK_SOURCE;
use jobscout_ingest::portals::{JoraCrawler, SeekCrawler};
use jobscout_ingest::progress::{create_spinner, format_bytes};
use tracing::{error, info, warn};

/// Exit status for a run that collected no data from any portal.
const EXIT_NO_DATA: i32 = 1;
/// Exit status for artifact write or startup failures.
const EXIT_FAILURE: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "jobscout")]
#[command(author, version, about = "Collects job listings from Jora and Seek into one CSV")]
struct Cli {
    /// Pages fetched per portal
    #[arg(long)]
    max_pages: Option<u32>,

    /// Per-portal deadline in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Artifact location
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Search query sent to every portal
    #[arg(long)]
    query: Option<String>,

    /// Search location sent to every portal
    #[arg(long)]
    location: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Terminal state of one pipeline run.
enum RunOutcome {
    Written {
        summary: ArtifactSummary,
        counts: BTreeMap<String, usize>,
    },
    NoData,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Environment provides the baseline; --verbose overrides the level
    let mut log_config = LogConfig::from_env().unwrap_or_default();
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }
    // The CLI should keep working even if logging cannot be initialized
    let _ = init_logging(&log_config);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("Error: {e}");
            process::exit(EXIT_FAILURE);
        },
    };

    match run(&config).await {
        Ok(RunOutcome::Written { summary, counts }) => {
            print_report(&summary, &counts);
        },
        Ok(RunOutcome::NoData) => {
            warn!("no job data collected from any portal");
            eprintln!("No job data was collected from any portal.");
            eprintln!("Check the collection diagnostics above for per-portal errors.");
            process::exit(EXIT_NO_DATA);
        },
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("Error: {e}");
            process::exit(EXIT_FAILURE);
        },
    }
}

/// Merge environment configuration with CLI overrides.
fn load_config(cli: &Cli) -> anyhow::Result<ScoutConfig> {
    let mut config = ScoutConfig::from_env()?;

    if let Some(max_pages) = cli.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(timeout) = cli.timeout {
        config.task_timeout_secs = timeout;
    }
    if let Some(ref output) = cli.output {
        config.output_path = output.clone();
    }
    if let Some(ref query) = cli.query {
        config.query = query.clone();
    }
    if let Some(ref location) = cli.location {
        config.location = location.clone();
    }

    config.validate()?;
    Ok(config)
}

/// The DISPATCH -> MERGE -> EMIT pipeline, run once.
async fn run(config: &ScoutConfig) -> jobscout_common::Result<RunOutcome> {
    let tasks = portal_tasks(config);
    info!(
        tasks = tasks.len(),
        max_pages = config.max_pages,
        query = %config.query,
        "starting concurrent collection"
    );

    let spinner = create_spinner("Collecting listings from Jora and Seek...");
    let results = dispatch_all(tasks).await;
    spinner.finish_and_clear();

    let table = consolidate(results);
    if table.is_empty() {
        return Ok(RunOutcome::NoData);
    }

    let counts = table.source_counts();
    let summary = write_csv(&table, &config.output_path)?;
    Ok(RunOutcome::Written { summary, counts })
}

/// The portal task list for one run: one independent task per portal,
/// sharing nothing but the configuration values they were built from.
fn portal_tasks(config: &ScoutConfig) -> Vec<ProducerTask> {
    let timeout = config.task_timeout();
    let jora = Arc::new(JoraCrawler::new(
        config.query.clone(),
        config.location.clone(),
    ));
    let seek = Arc::new(SeekCrawler::new(
        config.query.clone(),
        config.location.clone(),
    ));

    vec![
        ProducerTask::new(JORA_SOURCE, jora, config.max_pages, timeout),
        ProducerTask::new(SEEK_SOURCE, seek, config.max_pages, timeout),
    ]
}

/// Human-facing end-of-run report.
fn print_report(summary: &ArtifactSummary, counts: &BTreeMap<String, usize>) {
    println!("Combined data saved to: {}", summary.path.display());
    println!("Total jobs collected: {}", summary.rows);
    println!("File size: {}", format_bytes(summary.bytes));
    println!();
    println!("Jobs by source:");
    for (source, count) in counts {
        println!("  - {source}: {count} jobs");
    }
}
