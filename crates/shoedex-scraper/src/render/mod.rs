//! Browser-rendered listing pages.
//!
//! The listing lazy-loads product cards as the user scrolls, so a plain GET
//! only sees the first screenful. A [`PageRenderer`] loads the page in a
//! real browser, scrolls it to the bottom and hands back the final HTML,
//! which the fetcher accepts as a [`crate::PageSource::Rendered`].

#[cfg(feature = "browser")]
mod webdriver;

use std::future::Future;
use std::time::Duration;

use shoedex_core::{AppConfig, ScrollPolicy};

use crate::error::ScraperError;

#[cfg(feature = "browser")]
pub use webdriver::WebDriverRenderer;

/// Upper bound on scrolls for [`ScrollPolicy::UntilStable`], in case the
/// page keeps growing forever.
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
const MAX_STABLE_SCROLLS: u32 = 500;

/// Renders a URL and returns the fully-scrolled page source.
pub trait PageRenderer {
    fn render(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub policy: ScrollPolicy,
    /// Wait after each scroll for lazy content to load.
    pub pause: Duration,
}

impl ScrollOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            policy: config.scroll,
            pause: Duration::from_millis(config.scroll_pause_ms),
        }
    }
}

/// The two browser operations the scroll loop needs.
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
pub(crate) trait ScrollDriver {
    fn scroll_height(&self) -> impl Future<Output = Result<i64, ScraperError>> + Send;
    fn scroll_to_bottom(&self) -> impl Future<Output = Result<(), ScraperError>> + Send;
}

/// Scrolls according to `options` and returns how many scrolls were made.
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
pub(crate) async fn scroll_page<D: ScrollDriver + Sync>(
    driver: &D,
    options: &ScrollOptions,
) -> Result<u32, ScraperError> {
    match options.policy {
        ScrollPolicy::Times(times) => {
            for n in 1..=times {
                driver.scroll_to_bottom().await?;
                tokio::time::sleep(options.pause).await;
                tracing::debug!(scroll = n, of = times, "scrolled listing");
            }
            Ok(times)
        }
        ScrollPolicy::UntilStable => {
            let mut last_height = driver.scroll_height().await?;
            let mut scrolls = 0u32;
            while scrolls < MAX_STABLE_SCROLLS {
                driver.scroll_to_bottom().await?;
                scrolls += 1;
                tokio::time::sleep(options.pause).await;
                let new_height = driver.scroll_height().await?;
                tracing::debug!(scroll = scrolls, height = new_height, "scrolled listing");
                if new_height == last_height {
                    tracing::info!(scrolls, "reached bottom of listing");
                    return Ok(scrolls);
                }
                last_height = new_height;
            }
            tracing::warn!(scrolls, "listing still growing, stopping scroll");
            Ok(scrolls)
        }
    }
}
