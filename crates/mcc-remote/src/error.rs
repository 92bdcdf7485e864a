//! Remote client error types.

use thiserror::Error;

/// Errors that can occur when calling the MCP server or GitHub.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error, including connect failures and timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the remote.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a remote response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The remote returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl RemoteError {
    /// Whether the failure was a request timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
