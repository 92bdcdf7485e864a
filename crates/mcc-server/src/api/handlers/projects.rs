//! Project CRUD.

use axum::{
    Json,
    extract::{Path, State},
};
use mcc_core::entities::Project;
use mcc_db::repos::project::NewProject;
use mcc_db::updates::project::ProjectUpdate;

use crate::api::error::{ApiResult, NotFoundExt};
use crate::api::extract::ApiJson;
use crate::state::AppState;

pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(state.service.list_projects().await?))
}

pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewProject>,
) -> ApiResult<Json<Project>> {
    let project = state.service.create_project(new).await?;
    tracing::info!(project_id = project.id, name = %project.name, "project created");
    Ok(Json(project))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Project>> {
    Ok(Json(state.service.get_project(id).await.or_not_found("Project")?))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(update): ApiJson<ProjectUpdate>,
) -> ApiResult<Json<Project>> {
    Ok(Json(
        state
            .service
            .update_project(id, update)
            .await
            .or_not_found("Project")?,
    ))
}
