//! # mcc-remote
//!
//! HTTP clients for the two remote systems the control center talks to:
//! - the external MCP server (projects, features, proposals, tools)
//! - the GitHub REST API (repositories, languages)
//!
//! Both clients are thin: they build requests, check status codes through
//! [`http::check_response`](crate::http), and decode JSON. Mapping remote data
//! into local entities happens in the server.

pub mod github;
pub mod mcp;

mod error;
mod http;

pub use error::RemoteError;
pub use github::{GitHubClient, Repository, RepositoryOwner};
pub use mcp::McpClient;

/// User agent sent with every outbound request. GitHub rejects requests
/// without one.
pub(crate) const USER_AGENT: &str = concat!("mcc/", env!("CARGO_PKG_VERSION"));
