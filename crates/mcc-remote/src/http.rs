//! Shared HTTP response helpers for remote clients.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`RemoteError::Api`]) and JSON decoding so the
//! MCP and GitHub modules stay focused on request construction.

use serde::de::DeserializeOwned;

use crate::error::RemoteError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`RemoteError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`RemoteError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(RemoteError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(RemoteError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Check the response, then decode its body as JSON.
///
/// A body that is not valid JSON for `T` becomes [`RemoteError::Parse`].
pub async fn json_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, RemoteError> {
    let resp = check_response(resp).await?;
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| RemoteError::Parse(e.to_string()))
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
