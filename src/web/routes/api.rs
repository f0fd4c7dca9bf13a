use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::extract_data::{scrape_product_info, ScrapeOutcome};
use crate::web::app::AppState;

#[derive(Deserialize)]
pub struct ProductQuery {
    pub url: String,
}

/// Scrape outcome as JSON, for scripts that only need the fields.
pub async fn product_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<ScrapeOutcome> {
    Json(scrape_product_info(&state.client, &state.config, query.url.trim()).await)
}
