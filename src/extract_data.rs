use colored::Colorize;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::scraping::lookup::Page;
use crate::scraping::{
    extract_image_url, extract_item_number, extract_price, extract_title, fetch_page,
};

/// Fields of one product page used to fill a price tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub item_number: String,
    pub current_price: Option<String>,
    pub old_price: Option<String>,
    pub image_url: Option<String>,
}

impl ProductRecord {
    /// True when title, item number and current price are all present.
    /// Only complete records may be turned into a price tag.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.item_number.is_empty()
            && self
                .current_price
                .as_deref()
                .is_some_and(|price| !price.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScrapeOutcome {
    pub record: ProductRecord,
    /// Set when fetching failed; the record is then empty.
    pub diagnostic: Option<String>,
}

/// Extract the product fields from a page body.
pub fn extract_data(html_content: &str) -> ProductRecord {
    let page = Page::parse(html_content);

    ProductRecord {
        title: extract_title::extract_title(&page),
        item_number: extract_item_number::extract_item_number(&page),
        current_price: extract_price::extract_current_price(&page),
        old_price: extract_price::extract_old_price(&page),
        image_url: extract_image_url::extract_image_url(&page),
    }
}

/// Fetch a product page and extract its fields.
///
/// Never fails: a network error or an error status is logged and reported as
/// the outcome's single diagnostic, together with an empty record.
pub async fn scrape_product_info(client: &Client, config: &AppConfig, url: &str) -> ScrapeOutcome {
    println!("Scraping product page: {}", url);

    let body = match fetch_page::fetch_page(client, url, &config.scraper.user_agent).await {
        Ok(body) => body,
        Err(e) => {
            let diagnostic = format!("Fehler beim Auslesen der Webseite: {:#}", e);
            eprintln!("{}", diagnostic.red());
            return ScrapeOutcome {
                record: ProductRecord::default(),
                diagnostic: Some(diagnostic),
            };
        }
    };

    let record = extract_data(&body);

    println!("Title: {}", record.title);
    println!("Item number: {}", record.item_number);
    println!("Price: {}", record.current_price.as_deref().unwrap_or_default());
    if let Some(old_price) = &record.old_price {
        println!("Old price: {}", old_price);
    }
    match &record.image_url {
        Some(image_url) => println!("Image: {}", image_url),
        None => println!("{}", "No product image found".yellow()),
    }

    ScrapeOutcome {
        record,
        diagnostic: None,
    }
}
