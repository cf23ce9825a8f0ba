//! One scrape run: listing → product URLs → extraction batch → JSON file.

use std::path::PathBuf;

use anyhow::Context;
use shoedex_core::{AppConfig, ProductRecord};
use shoedex_scraper::{
    absolutize, extract_product_urls, write_json, BatchReport, ClientOptions,
    ExtractionPipeline, PageClient, PageSource, PipelineOptions,
};

/// What a finished run reports back to the user.
#[derive(Debug)]
pub(crate) struct RunSummary {
    /// Listing cards whose link could not be read.
    pub listing_skipped: usize,
    pub report: BatchReport,
    pub output_path: PathBuf,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.report)?;
        if self.listing_skipped > 0 {
            write!(f, "; {} listing cards skipped", self.listing_skipped)?;
        }
        write!(f, "\ndata saved to {}", self.output_path.display())
    }
}

/// Runs a full scrape. Returns `None` for a dry run, which only prints the
/// discovered URLs.
///
/// Per-product failures are counted, not propagated; the successful records
/// are written regardless.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the listing page
/// cannot be fetched or rendered, or the output file cannot be written.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    explicit_urls: Vec<String>,
    dry_run: bool,
) -> anyhow::Result<Option<RunSummary>> {
    let client = PageClient::new(&ClientOptions::from_app_config(config))
        .context("failed to build HTTP client")?;

    let (urls, listing_skipped) = if explicit_urls.is_empty() {
        discover_product_urls(&client, config).await?
    } else {
        (explicit_urls, 0)
    };

    if dry_run {
        println!(
            "dry-run: would extract {} products from {}",
            urls.len(),
            config.listing_url
        );
        for url in &urls {
            println!("{url}");
        }
        return Ok(None);
    }

    let pipeline = ExtractionPipeline::new(client, PipelineOptions::from_app_config(config));
    let outcomes = pipeline.run_batch(&urls).await;
    let report = BatchReport::from_outcomes(&outcomes);

    let records: Vec<ProductRecord> = outcomes
        .into_iter()
        .filter_map(|outcome| outcome.result.ok())
        .collect();
    write_json(&records, &config.output_path)
        .with_context(|| format!("failed to save products to {}", config.output_path.display()))?;

    Ok(Some(RunSummary {
        listing_skipped,
        report,
        output_path: config.output_path.clone(),
    }))
}

/// Loads the listing (browser-rendered when configured) and returns the
/// absolute product URLs plus the number of cards that had to be skipped.
async fn discover_product_urls(
    client: &PageClient,
    config: &AppConfig,
) -> anyhow::Result<(Vec<String>, usize)> {
    let source = listing_source(config).await?;
    let markup = client
        .fetch(&source)
        .await
        .with_context(|| format!("failed to load listing {}", config.listing_url))?;

    let mut urls = Vec::new();
    let mut skipped = 0usize;
    for href in extract_product_urls(&markup) {
        match href.and_then(|href| absolutize(&config.listing_url, &href)) {
            Ok(url) => urls.push(url),
            Err(e) => {
                tracing::warn!(error = %e, "skipping listing card");
                skipped += 1;
            }
        }
    }

    tracing::info!(
        products = urls.len(),
        skipped,
        listing = %config.listing_url,
        "collected product urls"
    );
    Ok((urls, skipped))
}

#[cfg(feature = "browser")]
async fn listing_source(config: &AppConfig) -> anyhow::Result<PageSource> {
    use shoedex_scraper::render::WebDriverRenderer;
    use shoedex_scraper::{PageRenderer, ScrollOptions};

    let Some(server_url) = &config.webdriver_url else {
        return Ok(PageSource::Url(config.listing_url.clone()));
    };
    let renderer = WebDriverRenderer::new(server_url, ScrollOptions::from_app_config(config));
    let html = renderer
        .render(&config.listing_url)
        .await
        .with_context(|| format!("failed to render listing via {server_url}"))?;
    Ok(PageSource::Rendered(html))
}

#[cfg(not(feature = "browser"))]
#[allow(clippy::unused_async)]
async fn listing_source(config: &AppConfig) -> anyhow::Result<PageSource> {
    if config.webdriver_url.is_some() {
        tracing::warn!(
            "SHOEDEX_WEBDRIVER_URL is set but this build has no `browser` feature; fetching the listing with a plain GET"
        );
    }
    Ok(PageSource::Url(config.listing_url.clone()))
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
