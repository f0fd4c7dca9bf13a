mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use httpmock::prelude::*;
use preisschild::document::page_setup::{CONTENT_TYPE, FILE_NAME};
use preisschild::web::{build_app, AppState};
use preisschild::inspect_document;
use reqwest::Client;
use tower::ServiceExt;

use common::{config_for, PRODUCT_PAGE};

fn app(server: &MockServer) -> axum::Router {
    build_app(AppState::new(config_for(server), Client::new()))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[tokio::test]
async fn test_empty_form() {
    let server = MockServer::start_async().await;

    let response = app(&server)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<input type="url" id="url" name="url" value="""#));
    assert!(!html.contains("/generate"));
}

#[tokio::test]
async fn test_preview_after_successful_scrape() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/kaminofen-clou");
            then.status(200).body(PRODUCT_PAGE);
        })
        .await;

    let uri = format!("/?url={}", urlencoding::encode(&server.url("/kaminofen-clou")));
    let response = app(&server)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Produktdaten erfolgreich geladen!"));
    assert!(html.contains("<strong>Modell:</strong> Kaminofen Austroflamm Clou Compact"));
    assert!(html.contains(r#"name="item_number" value="10452""#));
    assert!(html.contains(r#"action="/generate""#));
    assert!(html.contains(r#"<img src="https://www.ofen.de/media/image/clou-large.jpg""#));
}

#[tokio::test]
async fn test_failed_scrape_shows_both_errors() {
    let server = MockServer::start_async().await;

    let uri = format!("/?url={}", urlencoding::encode(&server.url("/missing")));
    let response = app(&server)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(html.contains("Fehler beim Auslesen der Webseite:"));
    assert!(html.contains("Einige Produktdaten konnten nicht geladen werden."));
    assert!(!html.contains(r#"action="/generate""#));
}

#[tokio::test]
async fn test_generate_returns_docx_download() {
    let server = MockServer::start_async().await;

    let body = form_body(&[
        ("title", "Kaminofen Austroflamm Clou Compact"),
        ("item_number", "10452"),
        ("current_price", "2.199,00 €"),
        ("old_price", ""),
        ("image_url", ""),
    ]);
    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], CONTENT_TYPE);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"{}\"", FILE_NAME).as_str()
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let layout = inspect_document(&bytes).unwrap();
    assert_eq!(layout.font.as_deref(), Some("Arial"));
    let text_block = layout.paragraphs.last().unwrap();
    assert_eq!(text_block.runs.len(), 4);
    assert_eq!(text_block.runs[3].text, "2.199,00 €\n");
}

#[tokio::test]
async fn test_generate_rejects_incomplete_record() {
    let server = MockServer::start_async().await;

    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(&[("title", "Ofen"), ("item_number", "1")])))
        .unwrap();

    let response = app(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_api_returns_json() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/kaminofen-clou");
            then.status(200).body(PRODUCT_PAGE);
        })
        .await;

    let uri = format!(
        "/api/product?url={}",
        urlencoding::encode(&server.url("/kaminofen-clou"))
    );
    let response = app(&server)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["record"]["item_number"], "10452");
    assert_eq!(json["record"]["old_price"], "2.499,00\u{a0}€");
    assert!(json["diagnostic"].is_null());
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start_async().await;

    let response = app(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}
