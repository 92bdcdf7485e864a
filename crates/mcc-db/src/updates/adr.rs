//! ADR update builder.

use mcc_core::enums::AdrStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdrUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequences_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AdrStatus>,
}

pub struct AdrUpdateBuilder(AdrUpdate);

impl AdrUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AdrUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn context_md(mut self, context_md: impl Into<String>) -> Self {
        self.0.context_md = Some(context_md.into());
        self
    }

    #[must_use]
    pub fn decision_md(mut self, decision_md: impl Into<String>) -> Self {
        self.0.decision_md = Some(decision_md.into());
        self
    }

    #[must_use]
    pub fn consequences_md(mut self, consequences_md: impl Into<String>) -> Self {
        self.0.consequences_md = Some(consequences_md.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: AdrStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> AdrUpdate {
        self.0
    }
}

impl Default for AdrUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
