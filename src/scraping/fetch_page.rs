use anyhow::{Context, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;

/// Downloads a page with a browser-like user agent. Non-2xx responses are errors.
pub async fn fetch_page(client: &Client, url: &str, user_agent: &str) -> Result<String> {
    let response = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .send()
        .await
        .with_context(|| format!("Failed to send request to {}", url))?
        .error_for_status()?;

    let body = response.text().await.context("Failed to read response body")?;

    Ok(body)
}
