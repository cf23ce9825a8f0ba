mod logging;
mod run;

use std::path::PathBuf;

use clap::Parser;
use shoedex_core::{AppConfig, Strictness};

#[derive(Debug, Parser)]
#[command(name = "shoedex")]
#[command(about = "Scrape a shoe retailer's product listing into a JSON file")]
struct Cli {
    /// Listing page to discover products from (overrides SHOEDEX_LISTING_URL)
    #[arg(long)]
    listing_url: Option<String>,

    /// Extract these product pages instead of discovering them (repeatable)
    #[arg(long = "url", value_name = "URL")]
    urls: Vec<String>,

    /// Output JSON path (overrides SHOEDEX_OUTPUT_PATH)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum concurrent product fetches; 0 means unbounded
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Pause after each product fetch, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Abort a product's record on the first missing field instead of defaulting it
    #[arg(long)]
    strict: bool,

    /// Print the discovered product URLs and exit without extracting
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Command-line flags win over environment configuration.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(url) = &self.listing_url {
            config.listing_url.clone_from(url);
        }
        if let Some(path) = &self.output {
            config.output_path.clone_from(path);
        }
        if let Some(cap) = self.max_concurrency {
            config.max_concurrency = (cap > 0).then_some(cap);
        }
        if let Some(ms) = self.delay_ms {
            config.request_delay_ms = ms;
        }
        if self.strict {
            config.strictness = Strictness::Strict;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = shoedex_core::load_app_config()?;
    cli.apply_to(&mut config);

    let _log_guard = logging::init_tracing(&config)?;
    tracing::debug!(?config, "configuration loaded");

    let summary = run::run_scrape(&config, cli.urls, cli.dry_run).await?;
    if let Some(summary) = summary {
        println!("{summary}");
    }
    Ok(())
}

#[cfg(test)]
mod tests;
