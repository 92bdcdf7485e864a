//! Document ingestion. Documents are stored as specifications.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use mcc_core::enums::SpecificationKind;
use mcc_core::responses::{
    BulkIngestError, BulkIngestItem, BulkIngestResponse, DocumentDetail, DocumentSummary,
    IngestResponse,
};
use mcc_db::repos::specification::{NewSpecification, SpecificationFilter};
use serde::Deserialize;
use serde_json::{Value, json};

use super::require_project_id;
use crate::api::error::{ApiError, ApiResult, NotFoundExt};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

const DEFAULT_DOC_VERSION: &str = "1.0.0";

fn default_doc_version() -> String {
    DEFAULT_DOC_VERSION.to_string()
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub project_id: Option<i64>,
    #[serde(default)]
    pub kind: SpecificationKind,
    #[serde(default = "default_doc_version")]
    pub version: String,
    pub filename: Option<String>,
}

/// Ingest a raw UTF-8 request body as a specification.
pub async fn upload_document(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UploadQuery>,
    body: Bytes,
) -> ApiResult<Json<IngestResponse>> {
    let project_id = require_project_id(query.project_id)?;
    state
        .service
        .get_project(project_id)
        .await
        .or_not_found("Project")?;

    let size_bytes = body.len();
    let content = String::from_utf8(body.to_vec())
        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {e}")))?;

    let spec = state
        .service
        .create_specification(NewSpecification {
            project_id,
            kind: query.kind,
            version: query.version,
            doc_md: content,
            links: Vec::new(),
        })
        .await?;

    let filename = query.filename.unwrap_or_else(|| "upload".to_string());
    Ok(Json(IngestResponse {
        status: "success".to_string(),
        message: format!("Document '{filename}' ingested successfully"),
        spec_id: spec.id,
        project_id,
        kind: spec.kind,
        version: spec.version,
        size_bytes,
    }))
}

#[derive(Debug, Deserialize)]
pub struct MarkdownIngest {
    pub project_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub kind: SpecificationKind,
    #[serde(default = "default_doc_version")]
    pub version: String,
    #[serde(default)]
    pub links: Vec<String>,
}

pub async fn ingest_markdown(
    State(state): State<AppState>,
    ApiJson(doc): ApiJson<MarkdownIngest>,
) -> ApiResult<Json<IngestResponse>> {
    let project_id = require_project_id(doc.project_id)?;
    let size_bytes = doc.content.len();
    let spec = state
        .service
        .create_specification(NewSpecification {
            project_id,
            kind: doc.kind,
            version: doc.version,
            doc_md: doc.content,
            links: doc.links,
        })
        .await
        .or_not_found("Project")?;

    Ok(Json(IngestResponse {
        status: "success".to_string(),
        message: format!("Documentation '{}' ingested successfully", doc.title),
        spec_id: spec.id,
        project_id,
        kind: spec.kind,
        version: spec.version,
        size_bytes,
    }))
}

/// Parse one loosely-typed bulk item. Errors are reported per item.
fn bulk_item(doc: &Value) -> Result<NewSpecification, String> {
    let project_id = doc
        .get("project_id")
        .and_then(Value::as_i64)
        .filter(|id| *id > 0)
        .ok_or_else(|| "Missing project_id".to_string())?;
    let kind = match doc.get("kind") {
        None | Some(Value::Null) => SpecificationKind::default(),
        Some(kind) => serde_json::from_value(kind.clone())
            .map_err(|_| format!("Invalid kind: {kind}"))?,
    };
    let version = doc
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_DOC_VERSION)
        .to_string();
    let content = doc
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let links = match doc.get("links") {
        None | Some(Value::Null) => Vec::new(),
        Some(links) => serde_json::from_value(links.clone())
            .map_err(|e| format!("Invalid links: {e}"))?,
    };
    Ok(NewSpecification {
        project_id,
        kind,
        version,
        doc_md: content,
        links,
    })
}

/// Ingest many documents. Bad items are collected, not fatal.
pub async fn bulk_ingest(
    State(state): State<AppState>,
    ApiJson(documents): ApiJson<Vec<Value>>,
) -> ApiResult<Json<BulkIngestResponse>> {
    let mut results = Vec::new();
    let mut errors = Vec::new();

    for doc in &documents {
        let new = match bulk_item(doc) {
            Ok(new) => new,
            Err(error) => {
                errors.push(BulkIngestError {
                    doc: doc.clone(),
                    error,
                });
                continue;
            }
        };
        let project_id = new.project_id;
        match state.service.create_specification(new).await {
            Ok(spec) => results.push(BulkIngestItem {
                spec_id: spec.id,
                project_id,
                kind: spec.kind,
            }),
            Err(mcc_db::error::DatabaseError::NoResult) => errors.push(BulkIngestError {
                doc: doc.clone(),
                error: format!("Project {project_id} not found"),
            }),
            Err(error) => errors.push(BulkIngestError {
                doc: doc.clone(),
                error: error.to_string(),
            }),
        }
    }

    let status = if errors.is_empty() { "success" } else { "partial" };
    tracing::info!(
        ingested = results.len(),
        failed = errors.len(),
        "bulk ingest finished"
    );
    Ok(Json(BulkIngestResponse {
        status: status.to_string(),
        ingested: results.len(),
        results,
        errors,
        total_attempted: documents.len(),
    }))
}

pub async fn list_documents(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<SpecificationFilter>,
) -> ApiResult<Json<Vec<DocumentSummary>>> {
    let specs = state.service.list_specifications(&filter).await?;
    Ok(Json(specs.iter().map(DocumentSummary::from).collect()))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DocumentDetail>> {
    let spec = state
        .service
        .get_specification(id)
        .await
        .or_not_found("Document")?;
    Ok(Json(DocumentDetail::from(spec)))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    state
        .service
        .delete_specification(id)
        .await
        .or_not_found("Document")?;
    Ok(Json(json!({
        "status": "success",
        "message": format!("Document {id} deleted"),
    })))
}
