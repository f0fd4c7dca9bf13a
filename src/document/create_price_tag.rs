use anyhow::Result;
use colored::Colorize;
use reqwest::Client;

use crate::config::AppConfig;
use crate::document::docx_package::{DocxDocument, Run};
use crate::document::fetch_image::{fetch_image, ImageData};
use crate::document::page_setup::{
    PageLayout, PriceTagFile, BACKGROUND_HEIGHT_MM, BACKGROUND_WIDTH_MM, FONT_FAMILY,
    PRODUCT_IMAGE_WIDTH_MM,
};
use crate::extract_data::ProductRecord;

pub const BACKGROUND_PLACEHOLDER: &str = "Hintergrundbild konnte nicht geladen werden.";
pub const PRODUCT_IMAGE_PLACEHOLDER: &str = "Produktbild konnte nicht geladen werden.";
pub const NO_PRODUCT_IMAGE: &str = "Kein Produktbild verfügbar.";

/// Builds the A5 price tag on an A4 page for a scraped product.
///
/// Every picture download is optional: when one fails a placeholder paragraph
/// takes its place. The only error left is failing to assemble the package itself.
pub async fn create_price_tag(
    client: &Client,
    config: &AppConfig,
    record: &ProductRecord,
) -> Result<PriceTagFile> {
    let user_agent = config.scraper.user_agent.as_str();

    let mut document = DocxDocument::new(PageLayout::a4_portrait(), FONT_FAMILY);
    document.set_title(&record.title);

    match fetch_background(client, config).await {
        Some(background) => document.add_centered_picture(
            background,
            BACKGROUND_WIDTH_MM,
            Some(BACKGROUND_HEIGHT_MM),
        ),
        None => document.add_text(BACKGROUND_PLACEHOLDER),
    }

    match record.image_url.as_deref() {
        Some(image_url) => match fetch_image(client, image_url, user_agent).await {
            Ok(image) => document.add_centered_picture(image, PRODUCT_IMAGE_WIDTH_MM, None),
            Err(e) => {
                eprintln!("{}", format!("Failed to load product image: {:#}", e).red());
                document.add_text(PRODUCT_IMAGE_PLACEHOLDER);
            }
        },
        None => document.add_text(NO_PRODUCT_IMAGE),
    }

    document.add_centered_runs(price_text_runs(record));

    let data = document.to_bytes()?;
    println!("{}", format!("Price tag created ({} bytes)", data.len()).green());

    Ok(PriceTagFile::new(data))
}

/// Primary background first, then the mirror on the shop domain.
async fn fetch_background(client: &Client, config: &AppConfig) -> Option<ImageData> {
    let user_agent = config.scraper.user_agent.as_str();

    match fetch_image(client, &config.document.background_url, user_agent).await {
        Ok(image) => return Some(image),
        Err(e) => eprintln!("{}", format!("Failed to load background: {:#}", e).yellow()),
    }

    match fetch_image(client, &config.document.background_fallback_url, user_agent).await {
        Ok(image) => Some(image),
        Err(e) => {
            eprintln!("{}", format!("Failed to load fallback background: {:#}", e).red());
            None
        }
    }
}

/// Title, item number, spacer and prices as one run sequence.
pub fn price_text_runs(record: &ProductRecord) -> Vec<Run> {
    let mut runs = vec![
        Run::new(record.title.as_str()).size(18.0).bold().line_break(),
        Run::new(format!("Artikelnummer: {}", record.item_number))
            .size(11.0)
            .line_break(),
        Run::new(" ").size(4.0).line_break(),
        Run::new(record.current_price.as_deref().unwrap_or_default())
            .size(24.0)
            .bold()
            .color(200, 0, 0)
            .line_break(),
    ];

    if let Some(old_price) = &record.old_price {
        runs.push(
            Run::new(old_price.as_str())
                .size(16.0)
                .strike()
                .color(120, 120, 120),
        );
    }

    runs
}
