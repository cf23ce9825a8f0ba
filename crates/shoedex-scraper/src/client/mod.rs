//! HTTP fetcher shared by the listing fetch and every detail-page task.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::error::ScraperError;
use crate::markup::Markup;
use crate::retry::retry_with_backoff;

/// Where a page's HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// Fetch with a plain GET.
    Url(String),
    /// HTML already rendered elsewhere, e.g. by a browser that scrolled the
    /// listing to the bottom.
    Rendered(String),
}

/// Construction options for [`PageClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl ClientOptions {
    #[must_use]
    pub fn from_app_config(config: &shoedex_core::AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            headers: config.request_headers.clone(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
        }
    }
}

/// HTTP client for storefront pages.
///
/// Cloning is cheap and shares the underlying connection pool, so one
/// client serves every concurrent extraction task. Non-2xx responses are
/// returned as [`ScraperError::UnexpectedStatus`] rather than as empty
/// markup. Redirects are followed.
#[derive(Clone)]
pub struct PageClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl PageClient {
    /// Creates a `PageClient` with a per-request timeout, fixed
    /// `User-Agent` and any extra default headers.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidHeader`] if a header name or value is not valid HTTP.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(options: &ClientOptions) -> Result<Self, ScraperError> {
        let headers = build_header_map(&options.headers)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(options.user_agent.as_str())
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            max_retries: options.max_retries,
            backoff_base_secs: options.backoff_base_secs,
        })
    }

    /// Fetches the body of `url` as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx final status.
    /// - [`ScraperError::Http`] on transport failure or timeout.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                )
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }
            Ok(response.text().await?)
        })
        .await
        .inspect_err(|e| {
            tracing::warn!(url, status = ?e.status(), error = %e, "error while requesting page");
        })
    }

    /// Fetches (or accepts) a page and parses it.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures from [`Self::fetch_text`]. Pre-rendered
    /// sources never fail.
    pub async fn fetch(&self, source: &PageSource) -> Result<Markup, ScraperError> {
        match source {
            PageSource::Url(url) => {
                let body = self.fetch_text(url).await?;
                Ok(Markup::parse(&body))
            }
            PageSource::Rendered(html) => Ok(Markup::parse(html)),
        }
    }
}

fn build_header_map(headers: &[(String, String)]) -> Result<HeaderMap, ScraperError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ScraperError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ScraperError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
