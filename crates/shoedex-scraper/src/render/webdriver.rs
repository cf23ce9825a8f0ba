//! `thirtyfour` WebDriver implementation of [`PageRenderer`].

use thirtyfour::prelude::*;

use super::{scroll_page, PageRenderer, ScrollDriver, ScrollOptions};
use crate::error::ScraperError;

const SCROLL_HEIGHT_JS: &str = "return document.body.scrollHeight";
const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";

fn render_err(e: &WebDriverError) -> ScraperError {
    ScraperError::Render(e.to_string())
}

/// Drives a headless Chrome session through a WebDriver server
/// (e.g. `chromedriver --port=9515`).
#[derive(Debug, Clone)]
pub struct WebDriverRenderer {
    server_url: String,
    scroll: ScrollOptions,
}

impl WebDriverRenderer {
    #[must_use]
    pub fn new(server_url: impl Into<String>, scroll: ScrollOptions) -> Self {
        Self {
            server_url: server_url.into(),
            scroll,
        }
    }

    async fn scrolled_source(&self, driver: &WebDriver, url: &str) -> Result<String, ScraperError> {
        driver.goto(url).await.map_err(|e| render_err(&e))?;
        scroll_page(driver, &self.scroll).await?;
        driver.source().await.map_err(|e| render_err(&e))
    }
}

impl PageRenderer for WebDriverRenderer {
    async fn render(&self, url: &str) -> Result<String, ScraperError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless().map_err(|e| render_err(&e))?;
        let driver = WebDriver::new(self.server_url.as_str(), caps)
            .await
            .map_err(|e| render_err(&e))?;

        tracing::info!(url, policy = %self.scroll.policy, "rendering listing in browser");
        let result = self.scrolled_source(&driver, url).await;

        if let Err(e) = driver.quit().await {
            tracing::warn!(error = %e, "failed to close browser session");
        }
        result
    }
}

impl ScrollDriver for WebDriver {
    async fn scroll_height(&self) -> Result<i64, ScraperError> {
        let ret = self
            .execute(SCROLL_HEIGHT_JS, Vec::new())
            .await
            .map_err(|e| render_err(&e))?;
        ret.json()
            .as_i64()
            .ok_or_else(|| ScraperError::Render(format!("scrollHeight was not an integer: {}", ret.json())))
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        self.execute(SCROLL_TO_BOTTOM_JS, Vec::new())
            .await
            .map_err(|e| render_err(&e))?;
        Ok(())
    }
}
