use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use reqwest::Client;

use crate::config::AppConfig;
use crate::document::{create_price_tag, inspect_document, DocumentLayout};
use crate::extract_data::scrape_product_info;

/// Scrapes `url` and writes the price tag to `output`, or to the default file name in `dir`.
pub async fn generate(
    client: &Client,
    config: &AppConfig,
    url: &str,
    output: Option<&Path>,
    dir: &Path,
) -> Result<PathBuf> {
    let outcome = scrape_product_info(client, config, url).await;
    if let Some(diagnostic) = outcome.diagnostic {
        bail!(diagnostic);
    }
    if !outcome.record.is_complete() {
        bail!("Einige Produktdaten konnten nicht geladen werden.");
    }

    let file = create_price_tag(client, config, &outcome.record).await?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => dir.join(file.file_name),
    };
    tokio::fs::write(&path, &file.data)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{}", format!("Saved {}", path.display()).green());
    Ok(path)
}

pub async fn inspect(path: &Path) -> Result<DocumentLayout> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    inspect_document(&bytes)
}

pub fn print_layout(layout: &DocumentLayout) {
    println!(
        "Page: {} x {} mm ({})",
        layout.page_width_mm,
        layout.page_height_mm,
        if layout.portrait { "portrait" } else { "landscape" }
    );
    println!(
        "Margins: top {} / bottom {} / left {} / right {} mm",
        layout.margin_top_mm, layout.margin_bottom_mm, layout.margin_left_mm, layout.margin_right_mm
    );
    println!("Font: {}", layout.font.as_deref().unwrap_or("-"));
    println!("Images: {}", layout.media_files.len());
    for paragraph in &layout.paragraphs {
        for (width, height) in &paragraph.pictures {
            println!("  [picture {} x {} mm]", width, height);
        }
        let text = paragraph.text();
        if !text.trim().is_empty() {
            println!("  {}", text.trim_end().replace('\n', " | "));
        }
    }
}
