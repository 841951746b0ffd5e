//! Sitemap-Batcher main entry point
//!
//! This is the command-line interface for the Sitemap-Batcher pipeline.

use anyhow::Context;
use clap::Parser;
use sitemap_batcher::config::{load_config_with_hash, Config};
use sitemap_batcher::pipeline::run_pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemap-Batcher: product URL discovery from sitemap indexes
///
/// Fetches a root sitemap index, crawls the child sitemaps whose URL
/// contains the configured keyword, splits the discovered page URLs into
/// fixed-size batches and writes them to an object store as one JSON file.
#[derive(Parser, Debug)]
#[command(name = "sitemap-batcher")]
#[command(version)]
#[command(about = "Export sitemap URLs in batches", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let report = run_pipeline(&config).await.context("pipeline run failed")?;
    println!("{}", report.to_json_pretty()?);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_batcher=info,warn"),
            1 => EnvFilter::new("sitemap_batcher=debug,info"),
            2 => EnvFilter::new("sitemap_batcher=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration
fn print_dry_run(config: &Config) {
    println!("=== Sitemap-Batcher Dry Run ===\n");

    println!("Discovery:");
    println!("  Root index: {}", config.discovery.root_url);
    println!("  Keyword: {}", config.discovery.keyword);
    println!("  Index pattern: {}", config.discovery.index_pattern);
    println!("  Leaf pattern: {}", config.discovery.leaf_pattern);
    println!("  Fetch timeout: {}s", config.discovery.fetch_timeout_secs);

    println!("\nBatching:");
    println!("  Batch size: {}", config.batching.batch_size);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nStorage:");
    println!("  Backend: {:?}", config.storage.backend);
    println!("  Bucket: {}", config.storage.bucket);
    if let Some(path) = &config.storage.path {
        println!("  Path: {}", path);
    }
    if let Some(endpoint) = &config.storage.endpoint {
        println!("  Endpoint: {}", endpoint);
        println!("  Token variable: {}", config.storage.token_env);
    }

    println!("\n✓ Configuration is valid");
}
