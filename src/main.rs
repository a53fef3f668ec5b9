//! Shopmap main entry point
//!
//! Command-line interface for the Shopmap product-listing crawler.

use anyhow::Context;
use clap::Parser;
use shopmap::config::load_config_with_hash;
use shopmap::crawler::crawl;
use shopmap::output::{print_summary, save_results};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shopmap: discover product-listing pages on e-commerce domains
///
/// Shopmap crawls each configured domain from its root, following category
/// and pagination links, and collects the product-page URLs it finds.
#[derive(Parser, Debug)]
#[command(name = "shopmap")]
#[command(version = "1.0.0")]
#[command(about = "Discovers product URLs on e-commerce domains", long_about = None)]
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

    /// Validate the config and show what would be crawled, without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let results_path = PathBuf::from(&config.output.results_path);
    let start = std::time::Instant::now();

    tracing::info!("Crawling {} domains", config.domains.len());
    let report = crawl(config).await?;

    print_summary(&report);
    save_results(&report, &results_path)?;

    println!(
        "\nTotal execution time: {:.2} seconds",
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shopmap=info,warn"),
            1 => EnvFilter::new("shopmap=debug,info"),
            2 => EnvFilter::new("shopmap=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &shopmap::config::Config) {
    println!("=== Shopmap Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages per domain: {}", config.crawler.max_pages_per_domain);
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!(
        "  Max connections per host: {}",
        config.crawler.max_connections_per_host
    );
    println!("  Batch size: {}", config.crawler.batch_size);
    println!("  Request delay: {}s", config.crawler.request_delay);
    println!("  Timeout: {}s", config.crawler.timeout);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Max depth: {}", config.crawler.max_depth);

    println!("\nPatterns:");
    println!("  Product: {}", config.patterns.product.len());
    println!("  Category: {}", config.patterns.category.len());
    println!("  Pagination: {}", config.patterns.pagination.len());

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);

    println!("\nDomains ({}):", config.domains.len());
    for domain in &config.domains {
        println!("  - {}", domain);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} domains", config.domains.len());
}
