//! MCP server integration: config, inbound updates, feature sync.

use axum::{Json, extract::State};
use mcc_core::enums::UpdateSource;
use serde::Deserialize;
use serde_json::{Value, json};

use super::require_project_id;
use crate::api::error::{ApiError, ApiResult, NotFoundExt};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn mcp_config(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "base_url": state.mcp.base_url(),
        "has_token": state.mcp.has_token(),
    }))
}

/// Record an update pushed by the MCP server. The whole body is stored as
/// the payload.
pub async fn receive_update(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<Value>> {
    let project_id = require_project_id(body.get("project_id").and_then(Value::as_i64))?;
    let update = state
        .service
        .create_agent_update(project_id, UpdateSource::Mcp, body)
        .await
        .or_not_found("Project")?;
    tracing::info!(project_id, update_id = update.id, "mcp update received");
    Ok(Json(json!({"status": "received", "id": update.id.to_string()})))
}

#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    pub project: Option<String>,
}

pub async fn sync_features(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SyncQuery>,
) -> ApiResult<Json<Value>> {
    let project = query
        .project
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::missing("project"))?;
    let features = state.mcp.list_features(&project).await.map_err(|error| {
        tracing::warn!(%project, %error, "mcp feature sync failed");
        ApiError::BadGateway(format!("Sync failed: {error}"))
    })?;
    Ok(Json(json!({
        "status": "synced",
        "project": project,
        "features_count": features.len(),
    })))
}
