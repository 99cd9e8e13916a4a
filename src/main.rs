//! Listing-Scout main entry point
//!
//! This is the command-line interface for the Listing-Scout listing scraper.

use anyhow::Context;
use clap::{ArgGroup, Parser};
use listing_scout::config::{load_or_default, Config};
use listing_scout::input::BatchRequest;
use listing_scout::output::{default_output_path, print_summary, WriteMode};
use listing_scout::pipeline::{scrape, AutoConfirm, Confirmation, Prompt, RunOutcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Listing-Scout: a polite real-estate listing scraper
///
/// Listing-Scout fetches listing pages one at a time with a randomized pause
/// between requests, extracts address, lot size, price, price per square foot
/// and days on market, and writes one CSV row per URL.
#[derive(Parser, Debug)]
#[command(name = "listing-scout")]
#[command(version = "1.0.0")]
#[command(about = "A polite real-estate listing scraper", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "file"])))]
struct Cli {
    /// Single listing URL to scrape
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Text file with one listing URL per line
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output CSV path (default: <prefix>_<YYYY-MM-DD_HH-MM>.csv)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Append to the output file instead of overwriting it
    #[arg(short, long)]
    append: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path of the failure log
    #[arg(long, value_name = "PATH")]
    error_log: Option<PathBuf>,

    /// Skip the large-batch confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_configuration(&cli)?;

    let batch = match (&cli.url, &cli.file) {
        (Some(url), _) => BatchRequest::single(url.as_str())?,
        (None, Some(path)) => BatchRequest::from_file(path)
            .with_context(|| format!("Could not load URLs from {}", path.display()))?,
        (None, None) => anyhow::bail!("Provide a listing URL or --file"),
    };

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&config.output.file_prefix));
    let mode = if cli.append {
        WriteMode::Append
    } else {
        WriteMode::Create
    };

    tracing::info!(
        "Scraping {} URL(s) from {} into {} ({:?})",
        batch.len(),
        config.site.domain,
        output_path.display(),
        mode
    );

    let mut confirmation: Box<dyn Confirmation> = if cli.yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(Prompt::stdio())
    };

    let outcome = scrape(config, &batch, &output_path, mode, confirmation.as_mut())
        .await
        .with_context(|| format!("Scrape into {} failed", output_path.display()))?;

    match outcome {
        RunOutcome::Completed(summary) => print_summary(&summary),
        RunOutcome::Aborted => println!("Aborted by user."),
    }

    Ok(())
}

/// Loads the configuration file, if any, and applies command-line overrides
fn load_configuration(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }

    let mut config = load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(error_log) = &cli.error_log {
        config.output.error_log = error_log.display().to_string();
    }

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_scout=info,warn"),
            1 => EnvFilter::new("listing_scout=debug,info"),
            2 => EnvFilter::new("listing_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
