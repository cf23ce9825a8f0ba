//! The product record produced once per detail page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Gallery key used when a product page has no per-colour swatches and the
/// hero image stands in for the whole product.
pub const DEFAULT_IMAGE_KEY: &str = "Default";

/// One product scraped from its detail page.
///
/// Serialized with the keys `title`, `subtitle`, `price`, `url` and
/// `image_url`; `available_size` is added only when sizes were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    /// Price in the smallest currency unit (whole dong for the VN store).
    #[serde(default)]
    pub price: i64,

    /// Detail page the record was extracted from. Stable key for the record.
    #[serde(rename = "url")]
    pub source_url: String,

    /// Colour name to image URL.
    #[serde(rename = "image_url", default)]
    pub images_by_color: BTreeMap<String, String>,

    /// Size labels offered on the detail page, in page order.
    #[serde(
        rename = "available_size",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub available_sizes: Vec<String>,
}

impl ProductRecord {
    /// Starts an empty record bound to its detail page.
    #[must_use]
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Self::default()
        }
    }

    /// `true` when extraction fell back to defaults for the title, i.e. the
    /// page was reachable but did not look like a product page.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.title.trim().is_empty()
    }
}
