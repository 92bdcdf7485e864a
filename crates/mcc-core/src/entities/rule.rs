use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{RuleCategory, RuleGate};

/// A project quality rule.
///
/// Only rules with `enabled = true` and `gate = FAIL` take part in proposal
/// gating. Everything else is informational.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Rule {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub category: RuleCategory,
    pub policy_md: String,
    pub gate: RuleGate,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rule {
    /// Whether this rule can block a proposal.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.enabled && self.gate.is_blocking()
    }
}
