//! ADR CRUD.

use axum::{
    Json,
    extract::{Path, State},
};
use mcc_core::entities::Adr;
use mcc_db::repos::adr::{AdrFilter, NewAdr};
use mcc_db::updates::adr::AdrUpdate;

use crate::api::error::{ApiResult, NotFoundExt};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn list_adrs(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<AdrFilter>,
) -> ApiResult<Json<Vec<Adr>>> {
    Ok(Json(state.service.list_adrs(&filter).await?))
}

pub async fn create_adr(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewAdr>,
) -> ApiResult<Json<Adr>> {
    let adr = state.service.create_adr(new).await.or_not_found("Project")?;
    Ok(Json(adr))
}

pub async fn get_adr(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Adr>> {
    Ok(Json(state.service.get_adr(id).await.or_not_found("ADR")?))
}

pub async fn update_adr(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(update): ApiJson<AdrUpdate>,
) -> ApiResult<Json<Adr>> {
    Ok(Json(
        state
            .service
            .update_adr(id, update)
            .await
            .or_not_found("ADR")?,
    ))
}
