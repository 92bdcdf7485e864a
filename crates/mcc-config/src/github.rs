//! GitHub API configuration.

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// Personal access token. Repository endpoints refuse to run without one.
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Whether GitHub sync is advertised as enabled.
    #[serde(default)]
    pub sync_enabled: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            sync_enabled: false,
        }
    }
}

impl GitHubConfig {
    /// Check if a token is available for authenticated calls.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }
}
