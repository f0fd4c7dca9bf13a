use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use colored::Colorize;
use reqwest::Client;

use crate::config::AppConfig;
use crate::web::routes::{api, generate, health, index};

/// Shared by every request; holds no per-user state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: Client,
}

impl AppState {
    pub fn new(config: AppConfig, client: Client) -> Self {
        AppState {
            config: Arc::new(config),
            client,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/generate", post(generate::generate_handler))
        .route("/api/product", get(api::product_handler))
        .route("/health", get(health::health_handler))
        .with_state(state)
}

pub async fn serve(state: AppState, bind: &str) -> Result<()> {
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;

    println!("{}", format!("Price tag form listening on http://{}", bind).green());

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
