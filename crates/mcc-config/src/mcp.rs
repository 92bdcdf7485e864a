//! MCP server connection configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct McpConfig {
    /// Base URL of the MCP server API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token. Empty means requests are sent unauthenticated.
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl McpConfig {
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// The token, if one is set.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.has_token().then_some(self.token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = McpConfig::default();
        assert_eq!(config.base_url, "http://localhost:8001");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.has_token());
        assert_eq!(config.token(), None);
    }

    #[test]
    fn token_is_exposed_when_set() {
        let config = McpConfig {
            token: "secret".into(),
            ..Default::default()
        };
        assert_eq!(config.token(), Some("secret"));
    }
}
