//! GitHub REST API client.

use std::collections::BTreeMap;
use std::time::Duration;

use mcc_config::GitHubConfig;
use serde::{Deserialize, Serialize};

use crate::{USER_AGENT, error::RemoteError, http::json_body};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A GitHub repository, reduced to the fields the control center uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub clone_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub owner: RepositoryOwner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

#[derive(Serialize)]
struct CreateRepositoryBody<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    auto_init: bool,
}

/// HTTP client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client against `api_url` with an optional personal access token.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Create a client from the `[github]` config section.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn from_config(config: &GitHubConfig) -> Self {
        let token = config.is_configured().then(|| config.token.clone());
        Self::new(config.api_url.clone(), token)
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.api_url);
        tracing::debug!(%method, %url, "github request");
        let req = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
        match &self.token {
            Some(token) => req.header(reqwest::header::AUTHORIZATION, format!("token {token}")),
            None => req,
        }
    }

    /// List repositories for `user`, or for the authenticated user when `None`.
    ///
    /// Returns at most 100 repositories (a single page).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, GitHub returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn list_repositories(
        &self,
        user: Option<&str>,
    ) -> Result<Vec<Repository>, RemoteError> {
        let path = match user {
            Some(user) => format!("/users/{}/repos?per_page=100", urlencoding::encode(user)),
            None => "/user/repos?per_page=100".to_string(),
        };
        let resp = self.request(reqwest::Method::GET, &path).send().await?;
        json_body(resp).await
    }

    /// Fetch a single repository.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, GitHub returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, RemoteError> {
        let path = format!(
            "/repos/{}/{}",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        let resp = self.request(reqwest::Method::GET, &path).send().await?;
        json_body(resp).await
    }

    /// Create a repository for the authenticated user, initialized with a README.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, GitHub returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn create_repository(
        &self,
        name: &str,
        description: &str,
        private: bool,
    ) -> Result<Repository, RemoteError> {
        let body = CreateRepositoryBody {
            name,
            description,
            private,
            auto_init: true,
        };
        let resp = self
            .request(reqwest::Method::POST, "/user/repos")
            .json(&body)
            .send()
            .await?;
        json_body(resp).await
    }

    /// Byte counts per language for a repository.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, GitHub returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn list_repository_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<BTreeMap<String, u64>, RemoteError> {
        let path = format!(
            "/repos/{}/{}/languages",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        let resp = self.request(reqwest::Method::GET, &path).send().await?;
        json_body(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_repository_fixture() {
        let json = r#"{
            "id": 1296269,
            "name": "hello-world",
            "full_name": "octocat/hello-world",
            "html_url": "https://github.com/octocat/hello-world",
            "clone_url": "https://github.com/octocat/hello-world.git",
            "description": "My first repo",
            "private": false,
            "language": "Rust",
            "topics": ["cli", "demo"],
            "owner": {"login": "octocat", "id": 1}
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.owner.login, "octocat");
        assert_eq!(repo.topics, vec!["cli".to_string(), "demo".to_string()]);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
    }

    #[test]
    fn parse_repository_without_topics() {
        let json = r#"{
            "name": "bare",
            "html_url": "https://github.com/octocat/bare",
            "owner": {"login": "octocat"}
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert!(repo.topics.is_empty());
        assert!(repo.description.is_none());
        assert!(!repo.private);
    }

    #[test]
    fn from_config_without_token() {
        let client = GitHubClient::from_config(&GitHubConfig::default());
        assert!(!client.has_token());
    }

    #[test]
    fn create_body_always_auto_inits() {
        let body = CreateRepositoryBody {
            name: "svc",
            description: "",
            private: true,
            auto_init: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["auto_init"], true);
        assert_eq!(json["private"], true);
    }
}
