//! Product Crawler CLI
//!
//! Runs the listing crawl with compiled-in defaults when invoked with no
//! arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use product_crawler::{
    error::Result,
    models::Config,
    pipeline,
    utils::HttpFetcher,
};

/// Product Crawler - WooCommerce listing scraper
#[derive(Parser, Debug)]
#[command(
    name = "product-crawler",
    version,
    about = "Scrapes product names and prices from a paginated shop listing"
)]

struct Cli {
    /// Optional TOML file overriding the built-in configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the listing and write the output feed (default)
    Crawl {
        /// First listing page
        #[arg(long)]
        start_url: Option<String>,

        /// Output file path (default: products.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Validate configuration and selectors
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Command::Crawl {
        start_url: None,
        output: None,
        max_pages: None,
    });

    match command {
        Command::Crawl {
            start_url,
            output,
            max_pages,
        } => {
            let mut config = match &cli.config {
                Some(path) => Config::load_or_default(path),
                None => Config::default(),
            };
            if let Some(url) = start_url {
                config.crawler.start_url = url;
            }
            if let Some(path) = output {
                config.output.path = path;
            }
            if max_pages.is_some() {
                config.pagination.max_pages = max_pages;
            }

            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            let report = pipeline::run_crawler(&config, fetcher).await?;

            log::info!(
                "Wrote {} products to {}",
                report.records_emitted,
                config.output.path.display()
            );
        }

        Command::Validate => match &cli.config {
            Some(path) => pipeline::run_validate_file(path)?,
            None => pipeline::run_validate(&Config::default())?,
        },
    }

    Ok(())
}
