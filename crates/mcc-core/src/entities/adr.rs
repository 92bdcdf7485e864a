use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AdrStatus;

/// Architecture decision record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Adr {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub context_md: String,
    pub decision_md: String,
    pub consequences_md: String,
    pub status: AdrStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
