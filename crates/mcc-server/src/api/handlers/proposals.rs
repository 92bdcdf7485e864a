//! Proposal listing, direct drafts, and the gated preview/submit workflow.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mcc_core::entities::Proposal;
use mcc_core::enums::ProposalStatus;
use mcc_db::repos::proposal::{NewProposal, ProposalFilter};
use mcc_gate::{PreviewOutcome, SubmitProposal};

use crate::api::error::{ApiResult, NotFoundExt};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn list_proposals(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ProposalFilter>,
) -> ApiResult<Json<Vec<Proposal>>> {
    Ok(Json(state.service.list_proposals(&filter).await?))
}

/// Store a proposal as a draft without running the gates.
pub async fn create_proposal(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewProposal>,
) -> ApiResult<Json<Proposal>> {
    let draft = NewProposal {
        status: ProposalStatus::Draft,
        ..new
    };
    let proposal = state
        .service
        .create_proposal(draft)
        .await
        .or_not_found("Project")?;
    Ok(Json(proposal))
}

pub async fn get_proposal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Proposal>> {
    Ok(Json(
        state
            .service
            .get_proposal(id)
            .await
            .or_not_found("Proposal")?,
    ))
}

pub async fn preview_proposal(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitProposal>,
) -> ApiResult<Json<PreviewOutcome>> {
    Ok(Json(state.workflow.preview(&request).await?))
}

/// Run the gated workflow. A rejection is answered with 400 and the
/// violation list; both success shapes are 200.
pub async fn submit_proposal(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitProposal>,
) -> ApiResult<Response> {
    let outcome = state.workflow.submit(request).await?;
    let status = if outcome.is_rejected() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)).into_response())
}
