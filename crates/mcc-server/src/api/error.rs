//! API error type and its JSON response mapping.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mcc_db::error::DatabaseError;
use mcc_gate::WorkflowError;
use mcc_remote::RemoteError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    /// A remote system (MCP or GitHub) failed.
    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    #[must_use]
    pub const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::BadGateway(_) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::BadRequest(format!("{field} is required"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if let Self::Internal(message) = &self {
            tracing::error!(%message, "internal error");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NoResult => Self::NotFound("Resource not found".to_string()),
            DatabaseError::InvalidState(message) => Self::BadRequest(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<WorkflowError> for ApiError {
    fn from(error: WorkflowError) -> Self {
        match error {
            WorkflowError::MissingField(field) => Self::missing(field),
            WorkflowError::ProjectNotFound(_) => Self::NotFound("Project not found".to_string()),
            WorkflowError::Database(e) => e.into(),
            WorkflowError::Payload(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<RemoteError> for ApiError {
    fn from(error: RemoteError) -> Self {
        Self::BadGateway(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Name the missing entity when a lookup finds nothing.
pub trait NotFoundExt<T> {
    /// # Errors
    ///
    /// Maps `DatabaseError::NoResult` to `ApiError::NotFound("{what} not found")`.
    fn or_not_found(self, what: &str) -> ApiResult<T>;
}

impl<T> NotFoundExt<T> for Result<T, DatabaseError> {
    fn or_not_found(self, what: &str) -> ApiResult<T> {
        self.map_err(|error| match error {
            DatabaseError::NoResult => ApiError::NotFound(format!("{what} not found")),
            other => other.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::missing("project_id").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::BadGateway("x".into()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn database_errors_map_by_kind() {
        assert!(matches!(
            ApiError::from(DatabaseError::NoResult),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(DatabaseError::InvalidState("bad transition".into())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(DatabaseError::Query("boom".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn workflow_errors_map_to_client_errors() {
        let missing = ApiError::from(WorkflowError::MissingField("project_id"));
        assert_eq!(missing.to_string(), "project_id is required");
        assert!(matches!(
            ApiError::from(WorkflowError::ProjectNotFound(3)),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn not_found_names_the_entity() {
        let result: Result<(), DatabaseError> = Err(DatabaseError::NoResult);
        let error = result.or_not_found("Rule").unwrap_err();
        assert_eq!(error.to_string(), "Rule not found");
    }
}
