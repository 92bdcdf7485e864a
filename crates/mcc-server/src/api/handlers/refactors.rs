//! Refactor plan CRUD.

use axum::{
    Json,
    extract::{Path, State},
};
use mcc_core::entities::RefactorPlan;
use mcc_db::repos::refactor::{NewRefactorPlan, RefactorPlanFilter};
use mcc_db::updates::refactor::RefactorPlanUpdate;

use crate::api::error::{ApiResult, NotFoundExt};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn list_refactors(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<RefactorPlanFilter>,
) -> ApiResult<Json<Vec<RefactorPlan>>> {
    Ok(Json(state.service.list_refactor_plans(&filter).await?))
}

pub async fn create_refactor(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewRefactorPlan>,
) -> ApiResult<Json<RefactorPlan>> {
    let plan = state
        .service
        .create_refactor_plan(new)
        .await
        .or_not_found("Project")?;
    Ok(Json(plan))
}

pub async fn get_refactor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RefactorPlan>> {
    Ok(Json(
        state
            .service
            .get_refactor_plan(id)
            .await
            .or_not_found("Refactor plan")?,
    ))
}

pub async fn update_refactor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(update): ApiJson<RefactorPlanUpdate>,
) -> ApiResult<Json<RefactorPlan>> {
    Ok(Json(
        state
            .service
            .update_refactor_plan(id, update)
            .await
            .or_not_found("Refactor plan")?,
    ))
}
