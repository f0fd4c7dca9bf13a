pub mod commands;
pub mod config;
pub mod document;
pub mod extract_data;
pub mod scraping;
pub mod web;

pub use config::{load_config, AppConfig};
pub use document::{create_price_tag, inspect_document, PriceTagFile};
pub use extract_data::{extract_data, scrape_product_info, ProductRecord, ScrapeOutcome};
