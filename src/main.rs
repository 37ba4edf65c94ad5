//! Website-Graph main entry point
//!
//! This is the command-line interface for the website link-graph analyzer.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use website_graph::config::{load_config_with_hash, validate, Config};
use website_graph::crawler::crawl_with_cancellation;
use website_graph::output::{print_report, CrawlReport};

/// Website-Graph: crawl a site and classify its link graph
///
/// Website-Graph crawls a site breadth-first from a seed URL while respecting
/// robots.txt, records every hyperlink as a directed edge, and reports the
/// graph's topology and summary metrics.
#[derive(Parser, Debug)]
#[command(name = "website-graph")]
#[command(version)]
#[command(about = "Crawl a website and classify its link graph", long_about = None)]
struct Cli {
    /// URL the crawl starts from
    #[arg(value_name = "SEED")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to fetch
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Maximum link depth from the seed
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Only follow links on the seed's host
    #[arg(long, value_name = "BOOL")]
    same_domain: Option<bool>,

    /// Delay between fetches in seconds
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Per-fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<f64>,

    /// Number of pages fetched in parallel
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Print the report as JSON, including node and edge lists
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        let crawler = &mut config.crawler;
        if let Some(max_pages) = self.max_pages {
            crawler.max_pages = max_pages;
        }
        if let Some(max_depth) = self.max_depth {
            crawler.max_depth = max_depth;
        }
        if let Some(same_domain) = self.same_domain {
            crawler.same_domain = same_domain;
        }
        if let Some(delay) = self.delay {
            crawler.inter_request_delay = delay;
        }
        if let Some(timeout) = self.timeout {
            crawler.fetch_timeout = timeout;
        }
        if let Some(concurrency) = self.concurrency {
            crawler.concurrency = concurrency;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    // Ctrl-C stops the crawl and keeps the partial graph
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with the graph built so far");
            interrupt.cancel();
        }
    });

    let outcome = crawl_with_cancellation(&cli.seed, config, cancel)
        .await
        .context("Crawl failed")?;

    let report = CrawlReport::from_outcome(&outcome);
    print_report(&report, cli.json)?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("website_graph=info,warn"),
            1 => EnvFilter::new("website_graph=debug,info"),
            2 => EnvFilter::new("website_graph=trace,debug"),
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
