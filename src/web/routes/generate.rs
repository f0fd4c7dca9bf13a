use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use colored::Colorize;
use serde::Deserialize;

use crate::document::create_price_tag;
use crate::extract_data::ProductRecord;
use crate::web::app::AppState;
use crate::web::templates;

/// The previewed record, echoed back through hidden form fields.
#[derive(Debug, Deserialize)]
pub struct PriceTagForm {
    pub title: String,
    pub item_number: String,
    #[serde(default)]
    pub current_price: String,
    #[serde(default)]
    pub old_price: String,
    #[serde(default)]
    pub image_url: String,
}

impl From<PriceTagForm> for ProductRecord {
    fn from(form: PriceTagForm) -> Self {
        fn optional(value: String) -> Option<String> {
            let value = value.trim().to_string();
            (!value.is_empty()).then_some(value)
        }

        ProductRecord {
            title: form.title.trim().to_string(),
            item_number: form.item_number.trim().to_string(),
            current_price: optional(form.current_price),
            old_price: optional(form.old_price),
            image_url: optional(form.image_url),
        }
    }
}

/// Renders the price tag and returns it as a download.
pub async fn generate_handler(
    State(state): State<AppState>,
    Form(form): Form<PriceTagForm>,
) -> Response {
    let record = ProductRecord::from(form);

    if !record.is_complete() {
        let body = templates::error_banner("❌ Einige Produktdaten konnten nicht geladen werden.");
        return (StatusCode::BAD_REQUEST, templates::page("", &body)).into_response();
    }

    match create_price_tag(&state.client, &state.config, &record).await {
        Ok(file) => (
            [
                (header::CONTENT_TYPE, file.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.file_name),
                ),
            ],
            file.data,
        )
            .into_response(),
        Err(e) => {
            eprintln!("{}", format!("Failed to create price tag: {:#}", e).red());
            let body = templates::error_banner("❌ Preisschild konnte nicht erstellt werden.");
            (StatusCode::INTERNAL_SERVER_ERROR, templates::page("", &body)).into_response()
        }
    }
}
