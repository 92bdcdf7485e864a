//! Project quality reports.

use axum::{Json, extract::State};
use mcc_core::enums::RuleCategory;
use mcc_core::responses::{QualityReport, SocReport, ViolationsReport};
use mcc_db::repos::rule::RuleFilter;
use mcc_gate::Candidate;
use serde::Deserialize;

use super::require_project_id;
use crate::api::error::{ApiResult, NotFoundExt};
use crate::api::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub project_id: Option<i64>,
}

pub async fn soc_report(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> ApiResult<Json<SocReport>> {
    let project_id = require_project_id(query.project_id)?;
    let project = state
        .service
        .get_project(project_id)
        .await
        .or_not_found("Project")?;
    let soc_rules = state
        .service
        .list_rules(&RuleFilter {
            project_id: Some(project_id),
            category: Some(RuleCategory::Soc),
            enabled: Some(true),
            gate: None,
        })
        .await?;
    Ok(Json(SocReport::build(&project, &soc_rules)))
}

pub async fn quality_report(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> ApiResult<Json<QualityReport>> {
    let project_id = require_project_id(query.project_id)?;
    let project = state
        .service
        .get_project(project_id)
        .await
        .or_not_found("Project")?;
    let rules = state
        .service
        .list_rules(&RuleFilter {
            project_id: Some(project_id),
            enabled: Some(true),
            ..RuleFilter::default()
        })
        .await?;
    Ok(Json(QualityReport::build(&project, &rules)))
}

/// Run the gates against an empty candidate.
pub async fn violations_report(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> ApiResult<Json<ViolationsReport>> {
    let project_id = require_project_id(query.project_id)?;
    let project = state
        .service
        .get_project(project_id)
        .await
        .or_not_found("Project")?;
    let violations = state
        .evaluator()
        .evaluate(&state.service, project_id, &Candidate::default())
        .await?;
    Ok(Json(ViolationsReport::build(&project, violations)))
}
