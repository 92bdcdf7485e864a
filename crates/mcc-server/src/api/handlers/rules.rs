//! Rule CRUD.

use axum::{
    Json,
    extract::{Path, State},
};
use mcc_core::entities::Rule;
use mcc_db::repos::rule::{NewRule, RuleFilter};
use mcc_db::updates::rule::RuleUpdate;

use crate::api::error::{ApiResult, NotFoundExt};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn list_rules(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<RuleFilter>,
) -> ApiResult<Json<Vec<Rule>>> {
    Ok(Json(state.service.list_rules(&filter).await?))
}

pub async fn create_rule(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewRule>,
) -> ApiResult<Json<Rule>> {
    let rule = state.service.create_rule(new).await.or_not_found("Project")?;
    tracing::info!(
        rule_id = rule.id,
        category = %rule.category,
        gate = %rule.gate,
        "rule created"
    );
    Ok(Json(rule))
}

pub async fn get_rule(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Rule>> {
    Ok(Json(state.service.get_rule(id).await.or_not_found("Rule")?))
}

pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(update): ApiJson<RuleUpdate>,
) -> ApiResult<Json<Rule>> {
    Ok(Json(
        state
            .service
            .update_rule(id, update)
            .await
            .or_not_found("Rule")?,
    ))
}
