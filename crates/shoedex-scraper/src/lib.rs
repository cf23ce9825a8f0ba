pub mod client;
pub mod detail;
pub mod error;
pub mod listing;
pub mod markup;
pub mod pipeline;
pub mod price;
pub mod render;
pub mod sink;

mod retry;

pub use client::{ClientOptions, PageClient, PageSource};
pub use detail::{extract_product, scrape_product};
pub use error::ScraperError;
pub use listing::{absolutize, extract_product_urls};
pub use markup::Markup;
pub use pipeline::{BatchReport, ExtractionPipeline, Outcome, PipelineOptions};
pub use price::parse_price;
pub use render::{PageRenderer, ScrollOptions};
pub use sink::write_json;
