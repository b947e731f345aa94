use std::time::Instant;

use hyper::StatusCode;
use serde_json::Value;

use crate::error::ProxyError;

/// Result of a real forward call to the target URL
#[derive(Debug, Clone)]
pub struct ForwardOutcome {
    /// Upstream HTTP status code, relayed to the caller verbatim
    pub status: StatusCode,

    /// Parsed upstream JSON payload
    pub payload: Value,

    /// Duration of the forward call in milliseconds
    pub fetch_ms: u64,
}

/// Perform the real GET to the target and parse its JSON body.
///
/// The upstream status is captured as-is, including non-2xx codes; only
/// network errors and unparseable bodies are surfaced as errors.
pub async fn forward(
    client: &reqwest::Client,
    target_url: &str,
) -> Result<ForwardOutcome, ProxyError> {
    let fetch_start = Instant::now();

    let response = client
        .get(target_url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ProxyError::UpstreamError(e.to_string()))?;

    let status = response.status();

    let payload: Value = response
        .json()
        .await
        .map_err(|e| ProxyError::UpstreamError(e.to_string()))?;

    let fetch_ms = fetch_start.elapsed().as_millis() as u64;

    tracing::debug!(
        "Forwarded to {} -> {} in {}ms",
        target_url,
        status,
        fetch_ms
    );

    Ok(ForwardOutcome {
        status,
        payload,
        fetch_ms,
    })
}
