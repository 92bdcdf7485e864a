//! Transient gate-evaluation result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Rule;
use crate::enums::RuleCategory;

/// One rule a candidate change failed.
///
/// Produced by gate evaluation and handed back to the caller; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated rule.
    pub rule: String,
    pub category: RuleCategory,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn for_rule(rule: &Rule, message: impl Into<String>) -> Self {
        Self {
            rule: rule.name.clone(),
            category: rule.category,
            message: message.into(),
        }
    }
}
