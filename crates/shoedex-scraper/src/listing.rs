//! Product URL discovery on the listing page.

use std::sync::LazyLock;

use scraper::Selector;

use crate::error::ScraperError;
use crate::markup::{static_selector, Markup};

const CARD_CSS: &str = "div.product-card__body";
const CARD_LINK_CSS: &str = "a.product-card__link-overlay";

static CARD: LazyLock<Selector> = LazyLock::new(|| static_selector(CARD_CSS));
static CARD_LINK: LazyLock<Selector> = LazyLock::new(|| static_selector(CARD_LINK_CSS));

/// Reads the detail-page link of every product card, in DOM order.
///
/// Duplicates are kept. A card without its link element (or with a link
/// that has no `href`) yields an `Err` in that card's slot instead of
/// aborting the listing. A page with no cards yields an empty `Vec`.
#[must_use]
pub fn extract_product_urls(markup: &Markup) -> Vec<Result<String, ScraperError>> {
    markup
        .select_all(&CARD)
        .enumerate()
        .map(|(index, card)| {
            card.select(&CARD_LINK)
                .next()
                .and_then(|link| link.value().attr("href"))
                .map(|href| href.trim().to_owned())
                .filter(|href| !href.is_empty())
                .ok_or_else(|| ScraperError::ElementNotFound {
                    selector: format!("{CARD_LINK_CSS}[href]"),
                    page: format!("listing card #{index}"),
                })
        })
        .collect()
}

/// Resolves a listing href against the listing page URL. Absolute hrefs are
/// returned unchanged apart from normalization.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `base` is not an absolute URL or
/// the join fails.
pub fn absolutize(base: &str, href: &str) -> Result<String, ScraperError> {
    let base_url = reqwest::Url::parse(base).map_err(|e| ScraperError::InvalidUrl {
        url: base.to_owned(),
        reason: e.to_string(),
    })?;
    base_url
        .join(href)
        .map(String::from)
        .map_err(|e| ScraperError::InvalidUrl {
            url: href.to_owned(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
