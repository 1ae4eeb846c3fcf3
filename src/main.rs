//! Smart Inspector main entry point
//!
//! This is the command-line driver for the keyword-hunting crawler. It runs
//! the controller tick by tick and prints the status feed as it grows.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use smart_inspector::config::{load_config_with_hash, validate, Config};
use smart_inspector::crawler::Controller;
use smart_inspector::output::{export_results, print_statistics, CrawlStatistics};
use smart_inspector::state::{CrawlSession, Phase};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Smart Inspector: find partner mentions on a website
///
/// Crawls the given site breadth-first (plus a small ring of external pages)
/// looking for the configured keywords. If the main site has no match, the
/// crawl moves through the site's category sections one at a time.
#[derive(Parser, Debug)]
#[command(name = "smart-inspector")]
#[command(version = "1.0.0")]
#[command(about = "A keyword-hunting site crawler", long_about = None)]
struct Cli {
    /// Website to inspect (https:// is assumed when no scheme is given)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep crawling after a match instead of stopping for review
    #[arg(long)]
    continue_on_match: bool,

    /// Stop after this many ticks
    #[arg(long, value_name = "N", default_value_t = 100)]
    max_ticks: u32,

    /// Write matches to a timestamped CSV file when the crawl stops
    #[arg(long)]
    export: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            let config = Config::default();
            validate(&config).context("Default configuration is invalid")?;
            config
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &cli.url);
        return Ok(());
    }

    handle_crawl(config, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("smart_inspector=warn"),
            1 => EnvFilter::new("smart_inspector=info,warn"),
            2 => EnvFilter::new("smart_inspector=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config, url: &str) {
    println!("=== Smart Inspector Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max pages per phase: {}",
        config.crawler.max_pages_per_phase
    );
    println!(
        "  Max external depth: {}",
        config.crawler.max_external_depth
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nMatcher:");
    println!("  Fuzzy threshold: {}", config.matcher.fuzzy_threshold);
    for keyword in &config.matcher.keywords {
        println!("  - {}", keyword);
    }

    println!("\nPriority Categories:");
    for category in &config.categories.priority {
        println!("  - {}", category);
    }

    println!("\nOutput:");
    println!("  Results directory: {}", config.output.results_dir);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling at {}",
        smart_inspector::normalize_seed(url)
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, cli: &Cli) -> anyhow::Result<()> {
    let results_dir = PathBuf::from(&config.output.results_dir);
    let mut controller = Controller::new(config).context("Failed to build HTTP client")?;

    controller.start(&cli.url);
    let mut printed = print_new_feed(controller.snapshot(), 0);

    for tick in 1..=cli.max_ticks {
        let report = controller.tick().await;
        printed = print_new_feed(controller.snapshot(), printed);
        tracing::debug!(
            "Tick {}: phase {}, processed {}, queued {}, matches {}",
            tick,
            report.phase,
            report.pages_processed,
            report.queued,
            report.matches
        );

        match report.phase {
            Phase::Paused(_) if cli.continue_on_match => {
                controller.resume();
                printed = print_new_feed(controller.snapshot(), printed);
            }
            Phase::MainDomain | Phase::CategoryCrawl(_) => {}
            _ => break,
        }
    }

    let session = controller.snapshot();
    if session.is_running() {
        tracing::warn!("Stopped after {} ticks", cli.max_ticks);
    }

    println!();
    print_statistics(&CrawlStatistics::from_session(session));
    print_matches(session);

    if cli.export {
        if session.matches().is_empty() {
            println!("\nNo matches to export.");
        } else {
            let path = export_results(session.matches(), Path::new(&results_dir))
                .context("Failed to export results")?;
            println!("\n✓ Results exported to: {}", path.display());
        }
    }

    Ok(())
}

/// Prints feed entries from `already_printed` onwards; returns the new count
fn print_new_feed(session: &CrawlSession, already_printed: usize) -> usize {
    let feed = session.feed();
    for entry in feed.iter().skip(already_printed) {
        println!("{}", entry);
    }
    feed.len()
}

fn print_matches(session: &CrawlSession) {
    if session.matches().is_empty() {
        println!("\nNo matches found.");
        return;
    }

    println!("\nMatches ({}):", session.matches().len());
    for record in session.matches() {
        println!(
            "  [{}] {}",
            record.found_at.with_timezone(&Local).format("%H:%M:%S"),
            record.kind
        );
        println!("    Source: {}", record.source_url);
        println!("    Context: {}", record.context);
    }
}
