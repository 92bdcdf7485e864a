use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{RefactorScope, RefactorStatus, RiskLevel};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RefactorPlan {
    pub id: i64,
    pub project_id: i64,
    pub scope: RefactorScope,
    pub rationale_md: String,
    pub soc_findings: Vec<String>,
    pub risk_level: RiskLevel,
    pub status: RefactorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
