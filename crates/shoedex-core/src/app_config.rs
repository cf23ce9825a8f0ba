use std::path::PathBuf;

/// How missing or malformed product fields are treated by the detail extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Missing elements and unparseable prices fall back to field defaults.
    #[default]
    Lenient,
    /// The first missing required field aborts that product's record.
    Strict,
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strictness::Lenient => write!(f, "lenient"),
            Strictness::Strict => write!(f, "strict"),
        }
    }
}

/// How far a browser renderer scrolls the listing page before taking its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPolicy {
    /// Scroll a fixed number of times.
    Times(u32),
    /// Scroll until the document height stops growing.
    UntilStable,
}

impl std::fmt::Display for ScrollPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrollPolicy::Times(n) => write!(f, "{n}"),
            ScrollPolicy::UntilStable => write!(f, "all"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub listing_url: String,
    pub user_agent: String,
    pub request_headers: Vec<(String, String)>,
    pub request_timeout_secs: u64,
    pub request_delay_ms: u64,
    /// `None` means one in-flight request per product URL.
    pub max_concurrency: Option<usize>,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub strictness: Strictness,
    pub output_path: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub webdriver_url: Option<String>,
    pub scroll: ScrollPolicy,
    pub scroll_pause_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Header values may carry cookies or tokens.
        let header_names: Vec<&str> = self
            .request_headers
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        f.debug_struct("AppConfig")
            .field("listing_url", &self.listing_url)
            .field("user_agent", &self.user_agent)
            .field("request_headers", &header_names)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("request_delay_ms", &self.request_delay_ms)
            .field("max_concurrency", &self.max_concurrency)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("strictness", &self.strictness)
            .field("output_path", &self.output_path)
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .field("webdriver_url", &self.webdriver_url)
            .field("scroll", &self.scroll)
            .field("scroll_pause_ms", &self.scroll_pause_ms)
            .finish()
    }
}
