use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FeatureStatus;

/// A planned or delivered product capability.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Feature {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description_md: String,
    pub status: FeatureStatus,
    /// 1 is the highest priority.
    pub priority: i64,
    pub labels: Vec<String>,
    /// Identifiers of the same feature on the MCP server.
    pub mcp_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
