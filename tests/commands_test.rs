mod common;

use httpmock::prelude::*;
use preisschild::commands;
use preisschild::document::page_setup::FILE_NAME;
use reqwest::Client;
use tempfile::TempDir;

use common::{config_for, png_bytes};

#[tokio::test]
async fn test_generate_writes_default_file_name() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    let page = format!(
        r#"<h1 class="product--title">Kaminofen Clou</h1>
        <p>Artikel-Nr.: 10452</p>
        <span class="price--content">2.199,00 €*</span>
        <img data-img-large="{}">"#,
        server.url("/media/clou.jpg")
    );
    server
        .mock_async(|when, then| {
            when.method(GET).path("/kaminofen-clou");
            then.status(200).body(&page);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/media/clou.jpg");
            then.status(200).body(png_bytes(300, 300));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/backend/background.png");
            then.status(200).body(png_bytes(148, 210));
        })
        .await;

    let config = config_for(&server);
    let path = commands::generate(
        &Client::new(),
        &config,
        &server.url("/kaminofen-clou"),
        None,
        temp_dir.path(),
    )
    .await
    .unwrap();

    assert_eq!(path, temp_dir.path().join(FILE_NAME));

    let layout = commands::inspect(&path).await.unwrap();
    assert_eq!((layout.page_width_mm, layout.page_height_mm), (210.0, 297.0));
    assert_eq!(layout.media_files.len(), 2);
    assert_eq!(layout.paragraphs[1].pictures, vec![(80.0, 80.0)]);
}

#[tokio::test]
async fn test_generate_refuses_failed_scrape() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let config = config_for(&server);
    let output = temp_dir.path().join("tag.docx");
    let result = commands::generate(
        &Client::new(),
        &config,
        &server.url("/missing"),
        Some(output.as_path()),
        temp_dir.path(),
    )
    .await;

    assert!(result.is_err());
    assert!(!output.exists());
}
