//! Proposal update builder.

use mcc_core::enums::ProposalStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProposalUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_manifest_json: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_features: Option<Vec<i64>>,
    /// Must be an allowed transition from the current status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProposalStatus>,
}

pub struct ProposalUpdateBuilder(ProposalUpdate);

impl ProposalUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProposalUpdate::default())
    }

    #[must_use]
    pub fn summary_md(mut self, summary_md: impl Into<String>) -> Self {
        self.0.summary_md = Some(summary_md.into());
        self
    }

    #[must_use]
    pub fn patch_manifest_json(mut self, manifest: serde_json::Value) -> Self {
        self.0.patch_manifest_json = Some(manifest);
        self
    }

    #[must_use]
    pub fn linked_features(mut self, linked_features: Vec<i64>) -> Self {
        self.0.linked_features = Some(linked_features);
        self
    }

    #[must_use]
    pub fn status(mut self, status: ProposalStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> ProposalUpdate {
        self.0
    }
}

impl Default for ProposalUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
