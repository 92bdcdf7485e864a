//! Feature update builder.

use mcc_core::enums::FeatureStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_ids: Option<Vec<String>>,
}

pub struct FeatureUpdateBuilder(FeatureUpdate);

impl FeatureUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(FeatureUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description_md(mut self, description_md: impl Into<String>) -> Self {
        self.0.description_md = Some(description_md.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: FeatureStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.0.labels = Some(labels);
        self
    }

    #[must_use]
    pub fn mcp_ids(mut self, mcp_ids: Vec<String>) -> Self {
        self.0.mcp_ids = Some(mcp_ids);
        self
    }

    #[must_use]
    pub fn build(self) -> FeatureUpdate {
        self.0
    }
}

impl Default for FeatureUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
