//! Specification update builder.

use mcc_core::enums::SpecificationKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecificationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SpecificationKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

pub struct SpecificationUpdateBuilder(SpecificationUpdate);

impl SpecificationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SpecificationUpdate::default())
    }

    #[must_use]
    pub fn kind(mut self, kind: SpecificationKind) -> Self {
        self.0.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.0.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn doc_md(mut self, doc_md: impl Into<String>) -> Self {
        self.0.doc_md = Some(doc_md.into());
        self
    }

    #[must_use]
    pub fn links(mut self, links: Vec<String>) -> Self {
        self.0.links = Some(links);
        self
    }

    #[must_use]
    pub fn build(self) -> SpecificationUpdate {
        self.0
    }
}

impl Default for SpecificationUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
