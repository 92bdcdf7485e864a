//! Project update builder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` clears the repository URL.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::double_option"
    )]
    pub repo_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_matrix: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

pub struct ProjectUpdateBuilder(ProjectUpdate);

impl ProjectUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProjectUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn repo_url(mut self, repo_url: Option<String>) -> Self {
        self.0.repo_url = Some(repo_url);
        self
    }

    #[must_use]
    pub fn language_matrix(mut self, language_matrix: BTreeMap<String, String>) -> Self {
        self.0.language_matrix = Some(language_matrix);
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.0.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn build(self) -> ProjectUpdate {
        self.0
    }
}

impl Default for ProjectUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_key_and_null_are_distinct() {
        let missing: ProjectUpdate = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(missing.repo_url, None);

        let cleared: ProjectUpdate = serde_json::from_str(r#"{"repo_url": null}"#).unwrap();
        assert_eq!(cleared.repo_url, Some(None));

        let set: ProjectUpdate =
            serde_json::from_str(r#"{"repo_url": "https://github.com/a/b"}"#).unwrap();
        assert_eq!(set.repo_url, Some(Some("https://github.com/a/b".into())));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<ProjectUpdate, _> = serde_json::from_str(r#"{"nmae": "typo"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field `nmae`"), "{err}");
    }

    #[test]
    fn builder_serializes_changed_fields_only() {
        let update = ProjectUpdateBuilder::new().name("Renamed").build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Renamed"}));
    }
}
