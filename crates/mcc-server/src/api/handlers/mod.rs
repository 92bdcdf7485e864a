//! Request handlers, one module per resource.

pub mod adrs;
pub mod agents;
pub mod documents;
pub mod features;
pub mod github;
pub mod mcp;
pub mod projects;
pub mod proposals;
pub mod refactors;
pub mod reports;
pub mod rules;
pub mod specs;
pub mod system;

use super::error::{ApiError, ApiResult};

/// Require a positive `project_id`, answering 400 otherwise.
pub(crate) fn require_project_id(project_id: Option<i64>) -> ApiResult<i64> {
    project_id
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::missing("project_id"))
}
