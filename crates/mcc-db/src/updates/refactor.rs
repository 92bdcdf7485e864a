//! Refactor plan update builder.

use mcc_core::enums::{RefactorScope, RefactorStatus, RiskLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefactorPlanUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<RefactorScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soc_findings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RefactorStatus>,
}

pub struct RefactorPlanUpdateBuilder(RefactorPlanUpdate);

impl RefactorPlanUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(RefactorPlanUpdate::default())
    }

    #[must_use]
    pub fn scope(mut self, scope: RefactorScope) -> Self {
        self.0.scope = Some(scope);
        self
    }

    #[must_use]
    pub fn rationale_md(mut self, rationale_md: impl Into<String>) -> Self {
        self.0.rationale_md = Some(rationale_md.into());
        self
    }

    #[must_use]
    pub fn soc_findings(mut self, soc_findings: Vec<String>) -> Self {
        self.0.soc_findings = Some(soc_findings);
        self
    }

    #[must_use]
    pub fn risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.0.risk_level = Some(risk_level);
        self
    }

    #[must_use]
    pub fn status(mut self, status: RefactorStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> RefactorPlanUpdate {
        self.0
    }
}

impl Default for RefactorPlanUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
