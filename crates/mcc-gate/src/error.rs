//! Workflow error types.

use mcc_db::error::DatabaseError;
use thiserror::Error;

/// Failures that end a workflow invocation without an outcome.
///
/// Rule violations and remote sync failures are not errors; they are
/// reported through [`SubmitOutcome`](crate::SubmitOutcome).
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A required request field is absent or invalid.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The referenced project does not exist.
    #[error("project {0} not found")]
    ProjectNotFound(i64),

    /// The request could not be serialized for forwarding.
    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),

    /// Storage failed. Nothing was committed.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}
