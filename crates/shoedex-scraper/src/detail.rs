//! Field extraction from a single product detail page.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use scraper::Selector;
use shoedex_core::{ProductRecord, Strictness, DEFAULT_IMAGE_KEY};

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::markup::{element_text, static_selector, Markup};
use crate::price::parse_price;

const TITLE_CSS: &str = "h1#pdp_product_title";
const SUBTITLE_CSS: &str = "h1#pdp_product_subtitle";
const PRICE_CSS: &str = "div#price-container";
const GALLERY_IMG_CSS: &str = "div#colorway-picker-container a img";
const HERO_IMG_CSS: &str = "div#hero-image img";
const SIZE_LABEL_CSS: &str = r#"div[data-testid="pdp-grid-selector-item"] label"#;

static TITLE: LazyLock<Selector> = LazyLock::new(|| static_selector(TITLE_CSS));
static SUBTITLE: LazyLock<Selector> = LazyLock::new(|| static_selector(SUBTITLE_CSS));
static PRICE: LazyLock<Selector> = LazyLock::new(|| static_selector(PRICE_CSS));
static GALLERY_IMG: LazyLock<Selector> = LazyLock::new(|| static_selector(GALLERY_IMG_CSS));
static HERO_IMG: LazyLock<Selector> = LazyLock::new(|| static_selector(HERO_IMG_CSS));
static SIZE_LABEL: LazyLock<Selector> = LazyLock::new(|| static_selector(SIZE_LABEL_CSS));

/// Size marker in full-resolution hero image URLs and its thumbnail counterpart.
const HERO_SIZE_TOKEN: &str = "_1728_";
const THUMB_SIZE_TOKEN: &str = "_144_";

/// Fetches one detail page and extracts its record.
///
/// `delay` is slept after the fetch completes and before parsing, as a crude
/// per-request rate limit. The parsed document never lives across an
/// `.await`, so the returned future is `Send`.
///
/// # Errors
///
/// Fetch failures from [`PageClient::fetch_text`], plus whatever
/// [`extract_product`] reports for the chosen strictness.
pub async fn scrape_product(
    client: &PageClient,
    url: &str,
    strictness: Strictness,
    delay: Duration,
) -> Result<ProductRecord, ScraperError> {
    let body = client.fetch_text(url).await?;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let markup = Markup::parse(&body);
    extract_product(&markup, url, strictness)
}

/// Builds a [`ProductRecord`] from a product page.
///
/// Each field is looked up independently. In [`Strictness::Lenient`] mode a
/// missing title, subtitle or price element (or an unparseable price)
/// degrades only that field to its default; in [`Strictness::Strict`] mode
/// it aborts the record. Images and sizes are never required.
///
/// # Errors
///
/// Strict mode only: [`ScraperError::ElementNotFound`] or
/// [`ScraperError::MalformedPrice`].
pub fn extract_product(
    markup: &Markup,
    source_url: &str,
    strictness: Strictness,
) -> Result<ProductRecord, ScraperError> {
    let mut record = ProductRecord::new(source_url);

    record.title = required_text(markup, &TITLE, TITLE_CSS, source_url, strictness)?;
    if record.title.is_empty() && strictness == Strictness::Strict {
        return Err(ScraperError::ElementNotFound {
            selector: TITLE_CSS.to_owned(),
            page: source_url.to_owned(),
        });
    }
    record.subtitle = required_text(markup, &SUBTITLE, SUBTITLE_CSS, source_url, strictness)?;

    let price_text = required_text(markup, &PRICE, PRICE_CSS, source_url, strictness)?;
    if !price_text.is_empty() || strictness == Strictness::Strict {
        record.price = match parse_price(&price_text) {
            Ok(price) => price,
            Err(e) if strictness == Strictness::Strict => return Err(e),
            Err(e) => {
                tracing::warn!(url = source_url, error = %e, "price unparseable, defaulting to 0");
                0
            }
        };
    }

    record.images_by_color = extract_images(markup);
    record.available_sizes = markup
        .select_all(&SIZE_LABEL)
        .map(element_text)
        .filter(|label| !label.is_empty())
        .collect();

    Ok(record)
}

fn required_text(
    markup: &Markup,
    selector: &Selector,
    css: &str,
    source_url: &str,
    strictness: Strictness,
) -> Result<String, ScraperError> {
    if let Some(element) = markup.select_first(selector) {
        return Ok(element_text(element));
    }
    match strictness {
        Strictness::Strict => Err(ScraperError::ElementNotFound {
            selector: css.to_owned(),
            page: source_url.to_owned(),
        }),
        Strictness::Lenient => {
            tracing::warn!(url = source_url, selector = css, "element missing, using default");
            Ok(String::new())
        }
    }
}

/// Colour → image URL mapping, falling back from the colour-swatch gallery
/// to a downsized hero image keyed [`DEFAULT_IMAGE_KEY`], then to `{}`.
pub(crate) fn extract_images(markup: &Markup) -> BTreeMap<String, String> {
    let gallery: BTreeMap<String, String> = markup
        .select_all(&GALLERY_IMG)
        .filter_map(|img| {
            let src = img.value().attr("src")?.trim();
            let color = color_from_alt(img.value().attr("alt")?);
            (!src.is_empty() && !color.is_empty()).then(|| (color.to_owned(), src.to_owned()))
        })
        .collect();
    if !gallery.is_empty() {
        return gallery;
    }

    markup
        .select_first(&HERO_IMG)
        .and_then(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(|src| BTreeMap::from([(DEFAULT_IMAGE_KEY.to_owned(), downsize_hero(src))]))
        .unwrap_or_default()
}

/// Swatch alt text is either a bare colour or `"<product> - <colour>"`.
fn color_from_alt(alt: &str) -> &str {
    alt.rsplit(" - ").next().unwrap_or(alt).trim()
}

fn downsize_hero(src: &str) -> String {
    src.replace(HERO_SIZE_TOKEN, THUMB_SIZE_TOKEN)
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
