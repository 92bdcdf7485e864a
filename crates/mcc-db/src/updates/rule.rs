//! Rule update builder.

use mcc_core::enums::{RuleCategory, RuleGate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<RuleCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<RuleGate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

pub struct RuleUpdateBuilder(RuleUpdate);

impl RuleUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(RuleUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: RuleCategory) -> Self {
        self.0.category = Some(category);
        self
    }

    #[must_use]
    pub fn policy_md(mut self, policy_md: impl Into<String>) -> Self {
        self.0.policy_md = Some(policy_md.into());
        self
    }

    #[must_use]
    pub fn gate(mut self, gate: RuleGate) -> Self {
        self.0.gate = Some(gate);
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.0.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn build(self) -> RuleUpdate {
        self.0
    }
}

impl Default for RuleUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_values_use_wire_casing() {
        let update: RuleUpdate = serde_json::from_str(r#"{"gate": "FAIL"}"#).unwrap();
        assert_eq!(update.gate, Some(RuleGate::Fail));
        assert!(serde_json::from_str::<RuleUpdate>(r#"{"gate": "fail"}"#).is_err());
    }
}
