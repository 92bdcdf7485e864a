use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Root aggregate. Every other entity references a project by id.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub repo_url: Option<String>,
    /// Language name to version string, e.g. `{"python": "3.12"}`.
    pub language_matrix: BTreeMap<String, String>,
    /// Free-form tags. Order is kept and duplicates are allowed.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
