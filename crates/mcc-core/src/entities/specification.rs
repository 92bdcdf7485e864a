use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SpecificationKind;

/// A versioned specification document. Ingested documents land here too.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Specification {
    pub id: i64,
    pub project_id: i64,
    pub kind: SpecificationKind,
    pub version: String,
    pub doc_md: String,
    pub links: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
