use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::UpdateSource;

/// An activity record pushed by an agent or the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AgentUpdate {
    pub id: i64,
    pub project_id: i64,
    pub source: UpdateSource,
    pub payload_json: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
