//! Feature CRUD.

use axum::{
    Json,
    extract::{Path, State},
};
use mcc_core::entities::Feature;
use mcc_db::repos::feature::{FeatureFilter, NewFeature};
use mcc_db::updates::feature::FeatureUpdate;

use crate::api::error::{ApiResult, NotFoundExt};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn list_features(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<FeatureFilter>,
) -> ApiResult<Json<Vec<Feature>>> {
    Ok(Json(state.service.list_features(&filter).await?))
}

pub async fn create_feature(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewFeature>,
) -> ApiResult<Json<Feature>> {
    let feature = state
        .service
        .create_feature(new)
        .await
        .or_not_found("Project")?;
    Ok(Json(feature))
}

pub async fn get_feature(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Feature>> {
    Ok(Json(state.service.get_feature(id).await.or_not_found("Feature")?))
}

pub async fn update_feature(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(update): ApiJson<FeatureUpdate>,
) -> ApiResult<Json<Feature>> {
    Ok(Json(
        state
            .service
            .update_feature(id, update)
            .await
            .or_not_found("Feature")?,
    ))
}
