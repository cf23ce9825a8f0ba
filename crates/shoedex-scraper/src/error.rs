use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("element \"{selector}\" not found on {page}")]
    ElementNotFound { selector: String, page: String },

    #[error("price text \"{raw}\" does not reduce to an integer")]
    MalformedPrice { raw: String },

    #[error("invalid request header \"{name}\": {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("browser rendering failed: {0}")]
    Render(String),

    #[error("failed to write {path}: {source}")]
    SinkWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize products: {0}")]
    SinkSerialize(#[from] serde_json::Error),
}

impl ScraperError {
    /// HTTP status carried by a fetch failure, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ScraperError::UnexpectedStatus { status, .. } => Some(*status),
            ScraperError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// `true` for failures that mean "no markup was obtained for this URL".
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. }
        )
    }
}
