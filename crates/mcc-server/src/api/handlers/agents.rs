//! Recent agent activity.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use mcc_core::entities::AgentUpdate;
use mcc_core::enums::UpdateSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiResult;
use crate::api::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub project_id: Option<i64>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AgentUpdateView {
    pub id: i64,
    pub project_id: i64,
    pub source: UpdateSource,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

impl From<AgentUpdate> for AgentUpdateView {
    fn from(update: AgentUpdate) -> Self {
        Self {
            id: update.id,
            project_id: update.project_id,
            source: update.source,
            payload: update.payload_json,
            created_at: update.created_at,
        }
    }
}

/// Newest updates first. `limit` defaults to `general.default_limit` and is
/// capped at 100.
pub async fn recent_updates(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecentQuery>,
) -> ApiResult<Json<Vec<AgentUpdateView>>> {
    let limit = query.limit.unwrap_or(state.config.general.default_limit);
    let updates = state
        .service
        .list_recent_agent_updates(query.project_id, limit)
        .await?;
    Ok(Json(updates.into_iter().map(AgentUpdateView::from).collect()))
}
