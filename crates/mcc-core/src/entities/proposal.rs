use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProposalStatus;

/// A structured change request against a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Proposal {
    pub id: i64,
    pub project_id: i64,
    pub summary_md: String,
    /// Opaque description of the change. Never interpreted by the gate.
    pub patch_manifest_json: serde_json::Value,
    /// Feature ids this proposal relates to. Not enforced as foreign keys.
    pub linked_features: Vec<i64>,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
