//! Parsed HTML document with the few lookups the extractors need.

use scraper::{ElementRef, Html, Selector};

/// A parsed, navigable HTML document.
///
/// Wraps [`scraper::Html`], which is not `Send`; parse it after the last
/// `.await` of a task and drop it before the next one.
pub struct Markup {
    document: Html,
}

impl Markup {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            document: Html::parse_document(raw),
        }
    }

    /// First element matching `selector`, in document order.
    #[must_use]
    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.document.select(selector).next()
    }

    /// Every element matching `selector`, in document order.
    pub fn select_all<'a>(
        &'a self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.document.select(selector)
    }
}

impl std::fmt::Debug for Markup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Markup")
            .field("root", &self.document.root_element().value().name())
            .finish()
    }
}

/// Concatenated, whitespace-trimmed text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parse a selector that is a compile-time constant.
pub(crate) fn static_selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("valid css selector")
}
