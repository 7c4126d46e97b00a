use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

// Browser-like identification; the listing page serves bot UAs a stub.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/120.0.0.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One blocking-style GET for the listing page. Any transport failure,
/// timeout, or non-2xx status is fatal to the run.
pub async fn fetch_html(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("Bad status from {url}"))?;

    let body = response
        .text()
        .await
        .context("Failed to read response body")?;
    info!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
