//! Client for the external MCP server.
//!
//! The MCP server is a loosely-typed JSON API. Responses are passed through as
//! [`serde_json::Value`] and interpreted by the caller.

use std::time::Duration;

use mcc_config::McpConfig;
use serde::Serialize;
use serde_json::Value;

use crate::{
    USER_AGENT,
    error::RemoteError,
    http::{check_response, json_body},
};

/// HTTP client for the external MCP server.
#[derive(Debug, Clone)]
pub struct McpClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl McpClient {
    /// Create a client for `base_url` with an optional bearer token.
    ///
    /// A trailing `/` on `base_url` is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Create a client from the `[mcp]` config section.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn from_config(config: &McpConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.token().map(String::from),
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = self.url(path);
        tracing::debug!(%url, "mcp GET");
        let resp = self.authorize(self.http.get(&url)).send().await?;
        json_body(resp).await
    }

    /// List projects known to the MCP server.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, the server returns a
    /// non-success status, or the body is not a JSON array.
    pub async fn list_projects(&self) -> Result<Vec<Value>, RemoteError> {
        self.get_json("/projects").await
    }

    /// List the features of `project` on the MCP server.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, the server returns a
    /// non-success status, or the body is not a JSON array.
    pub async fn list_features(&self, project: &str) -> Result<Vec<Value>, RemoteError> {
        let path = format!("/projects/{}/features", urlencoding::encode(project));
        self.get_json(&path).await
    }

    /// Fetch a single feature by its MCP identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails or the server returns a
    /// non-success status.
    pub async fn get_feature(&self, feature_id: &str) -> Result<Value, RemoteError> {
        let path = format!("/features/{}", urlencoding::encode(feature_id));
        self.get_json(&path).await
    }

    /// Forward a proposal to the MCP server for `project`.
    ///
    /// Returns the server's JSON acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, times out, or the server
    /// returns a non-success status.
    pub async fn post_proposal<P: Serialize + Sync>(
        &self,
        project: &str,
        payload: &P,
    ) -> Result<Value, RemoteError> {
        let url = self.url(&format!(
            "/projects/{}/proposals",
            urlencoding::encode(project)
        ));
        tracing::debug!(%url, "mcp POST proposal");
        let resp = self
            .authorize(self.http.post(&url))
            .json(payload)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| RemoteError::Parse(e.to_string()))
    }

    /// List the tools the MCP server exposes.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, the server returns a
    /// non-success status, or the body is not a JSON array.
    pub async fn list_tools(&self) -> Result<Vec<Value>, RemoteError> {
        self.get_json("/tools").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = McpClient::new("http://mcp.local/", None, Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://mcp.local");
        assert_eq!(client.url("/tools"), "http://mcp.local/tools");
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let client = McpClient::new("http://mcp.local", Some(String::new()), Duration::from_secs(1));
        assert!(!client.has_token());

        let client = McpClient::new("http://mcp.local", Some("abc".into()), Duration::from_secs(1));
        assert!(client.has_token());
    }

    #[test]
    fn from_config_uses_section_values() {
        let config = McpConfig {
            base_url: "http://mcp.example:9000".into(),
            token: "secret".into(),
            timeout_secs: 5,
        };
        let client = McpClient::from_config(&config);
        assert_eq!(client.base_url(), "http://mcp.example:9000");
        assert!(client.has_token());
    }
}
