use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::extract_data::scrape_product_info;
use crate::web::app::AppState;
use crate::web::templates;

#[derive(Deserialize)]
pub struct IndexQuery {
    pub url: Option<String>,
}

/// The form; with a `url` it also scrapes the page and previews the fields.
pub async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    let url = query.url.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return templates::page(url, "");
    }

    let outcome = scrape_product_info(&state.client, &state.config, url).await;

    let mut body = String::new();
    if let Some(diagnostic) = &outcome.diagnostic {
        body.push_str(&templates::error_banner(diagnostic));
    }

    if outcome.record.is_complete() {
        body.push_str(&templates::success_banner("✅ Produktdaten erfolgreich geladen!"));
        body.push_str(&templates::product_preview(&outcome.record));
        body.push_str(&templates::generate_form(&outcome.record));
        body.push_str(&templates::api_link(url));
    } else {
        body.push_str(&templates::error_banner(
            "❌ Einige Produktdaten konnten nicht geladen werden.",
        ));
    }

    templates::page(url, &body)
}
