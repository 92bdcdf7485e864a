//! Specification CRUD.

use axum::{
    Json,
    extract::{Path, State},
};
use mcc_core::entities::Specification;
use mcc_db::repos::specification::{NewSpecification, SpecificationFilter};
use mcc_db::updates::specification::SpecificationUpdate;

use crate::api::error::{ApiResult, NotFoundExt};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn list_specs(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<SpecificationFilter>,
) -> ApiResult<Json<Vec<Specification>>> {
    Ok(Json(state.service.list_specifications(&filter).await?))
}

pub async fn create_spec(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewSpecification>,
) -> ApiResult<Json<Specification>> {
    let spec = state
        .service
        .create_specification(new)
        .await
        .or_not_found("Project")?;
    Ok(Json(spec))
}

pub async fn get_spec(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Specification>> {
    Ok(Json(
        state
            .service
            .get_specification(id)
            .await
            .or_not_found("Specification")?,
    ))
}

pub async fn update_spec(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(update): ApiJson<SpecificationUpdate>,
) -> ApiResult<Json<Specification>> {
    Ok(Json(
        state
            .service
            .update_specification(id, update)
            .await
            .or_not_found("Specification")?,
    ))
}
