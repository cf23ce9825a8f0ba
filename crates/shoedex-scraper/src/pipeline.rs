//! Concurrent detail-page extraction over a batch of product URLs.
//!
//! One task per URL, all driven on the current task with a shared
//! [`PageClient`]. Results come back in input order and every URL gets
//! exactly one [`Outcome`], whatever happens to its siblings.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use shoedex_core::{AppConfig, ProductRecord, Strictness};

use crate::client::PageClient;
use crate::detail::scrape_product;
use crate::error::ScraperError;

/// Tuning for [`ExtractionPipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub strictness: Strictness,
    /// Pause after each detail fetch, before parsing.
    pub request_delay: Duration,
    /// Maximum in-flight extractions. `None` starts every URL at once.
    pub max_concurrency: Option<usize>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            strictness: Strictness::Lenient,
            request_delay: Duration::from_secs(1),
            max_concurrency: None,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            strictness: config.strictness,
            request_delay: Duration::from_millis(config.request_delay_ms),
            max_concurrency: config.max_concurrency,
        }
    }
}

/// The result slot for one input URL.
#[derive(Debug)]
pub struct Outcome {
    pub url: String,
    pub result: Result<ProductRecord, ScraperError>,
}

/// Success/failure tally for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Successes whose title fell back to empty (lenient mode only).
    pub degraded: usize,
}

impl BatchReport {
    #[must_use]
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut report, outcome| {
                report.total += 1;
                match &outcome.result {
                    Ok(record) => {
                        report.succeeded += 1;
                        if record.is_degraded() {
                            report.degraded += 1;
                        }
                    }
                    Err(_) => report.failed += 1,
                }
                report
            })
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} products: {} succeeded ({} degraded), {} failed",
            self.total, self.succeeded, self.degraded, self.failed
        )
    }
}

/// Runs the detail extractor across many product URLs concurrently.
pub struct ExtractionPipeline {
    client: PageClient,
    options: PipelineOptions,
}

impl ExtractionPipeline {
    #[must_use]
    pub fn new(client: PageClient, options: PipelineOptions) -> Self {
        Self { client, options }
    }

    /// Extracts every URL and returns one [`Outcome`] per input, in input
    /// order regardless of completion order.
    ///
    /// A failing URL (HTTP error, missing element in strict mode, malformed
    /// price) only fills its own slot; siblings keep running. Duplicated
    /// URLs are extracted once per occurrence.
    pub async fn run_batch(&self, urls: &[String]) -> Vec<Outcome> {
        if urls.is_empty() {
            return Vec::new();
        }
        let limit = self
            .options
            .max_concurrency
            .map_or(urls.len(), |cap| cap.max(1));

        tracing::info!(
            count = urls.len(),
            concurrency = limit,
            strictness = %self.options.strictness,
            "extracting products"
        );

        let outcomes: Vec<Outcome> = stream::iter(urls)
            .map(|url| self.extract_one(url))
            .buffered(limit)
            .collect()
            .await;

        let report = BatchReport::from_outcomes(&outcomes);
        tracing::info!(
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            degraded = report.degraded,
            "batch complete"
        );
        outcomes
    }

    async fn extract_one(&self, url: &str) -> Outcome {
        let result = scrape_product(
            &self.client,
            url,
            self.options.strictness,
            self.options.request_delay,
        )
        .await;
        match &result {
            Ok(record) => tracing::debug!(url, title = %record.title, price = record.price, "extracted product"),
            Err(e) => tracing::warn!(url, error = %e, "product extraction failed"),
        }
        Outcome {
            url: url.to_owned(),
            result,
        }
    }
}
