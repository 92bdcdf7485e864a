//! Gated proposal submission.
//!
//! `submit` validates the request, evaluates the project's blocking rules,
//! stores the proposal, and only then forwards it to the [`ProposalSink`].
//! The stored row is the source of truth: a sink failure downgrades the
//! outcome to [`SubmitOutcome::SubmittedLocally`] and is never retried.

use std::sync::Arc;

use mcc_core::Violation;
use mcc_core::entities::Project;
use mcc_core::enums::ProposalStatus;
use mcc_db::error::DatabaseError;
use mcc_db::repos::proposal::NewProposal;
use mcc_db::service::ControlService;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WorkflowError;
use crate::evaluator::{Candidate, GateEvaluator};
use crate::sink::ProposalSink;

const REJECTION_MESSAGE: &str = "Proposal violates quality gates";

fn empty_manifest() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Request body for submit and preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitProposal {
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default, alias = "summary")]
    pub summary_md: String,
    #[serde(default = "empty_manifest", alias = "patch_manifest")]
    pub patch_manifest_json: Value,
    #[serde(default)]
    pub linked_features: Vec<i64>,
    /// Caller keys not modelled above. Forwarded to the sink untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl SubmitProposal {
    #[must_use]
    pub fn new(project_id: i64, summary_md: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id),
            summary_md: summary_md.into(),
            patch_manifest_json: empty_manifest(),
            linked_features: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// The project id, if present and positive.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::MissingField("project_id")` otherwise.
    pub fn project_id(&self) -> Result<i64, WorkflowError> {
        self.project_id
            .filter(|id| *id > 0)
            .ok_or(WorkflowError::MissingField("project_id"))
    }

    #[must_use]
    pub fn candidate(&self) -> Candidate {
        Candidate {
            summary_md: self.summary_md.clone(),
            patch_manifest_json: self.patch_manifest_json.clone(),
            linked_features: self.linked_features.clone(),
        }
    }
}

/// Terminal state of a submission that was not a hard error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Stored locally and accepted by the remote.
    Submitted {
        proposal_id: i64,
        mcp_response: Value,
    },
    /// Stored locally; forwarding failed.
    SubmittedLocally { proposal_id: i64, mcp_error: String },
    /// Blocked by one or more rules. Nothing was stored or sent.
    Rejected {
        message: String,
        violations: Vec<Violation>,
    },
}

impl SubmitOutcome {
    /// Id of the stored proposal, unless rejected.
    #[must_use]
    pub const fn proposal_id(&self) -> Option<i64> {
        match self {
            Self::Submitted { proposal_id, .. } | Self::SubmittedLocally { proposal_id, .. } => {
                Some(*proposal_id)
            }
            Self::Rejected { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Whether the remote acknowledged the proposal.
    #[must_use]
    pub const fn is_synced_remote(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }
}

/// Result of a dry-run evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewOutcome {
    pub valid: bool,
    pub violations: Vec<Violation>,
    pub summary: String,
    pub project_id: i64,
}

/// Runs submissions and previews against one store and one sink.
pub struct ProposalWorkflow {
    service: Arc<ControlService>,
    evaluator: GateEvaluator,
    sink: Arc<dyn ProposalSink>,
}

impl ProposalWorkflow {
    #[must_use]
    pub fn new(
        service: Arc<ControlService>,
        evaluator: GateEvaluator,
        sink: Arc<dyn ProposalSink>,
    ) -> Self {
        Self {
            service,
            evaluator,
            sink,
        }
    }

    #[must_use]
    pub const fn evaluator(&self) -> &GateEvaluator {
        &self.evaluator
    }

    async fn load_project(&self, project_id: i64) -> Result<Project, WorkflowError> {
        match self.service.get_project(project_id).await {
            Ok(project) => Ok(project),
            Err(DatabaseError::NoResult) => Err(WorkflowError::ProjectNotFound(project_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Evaluate a request without storing or forwarding anything.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError` if `project_id` is missing, the project does
    /// not exist, or the rules cannot be loaded.
    pub async fn preview(&self, request: &SubmitProposal) -> Result<PreviewOutcome, WorkflowError> {
        let project_id = request.project_id()?;
        self.load_project(project_id).await?;

        let violations = self
            .evaluator
            .evaluate(&self.service, project_id, &request.candidate())
            .await?;

        Ok(PreviewOutcome {
            valid: violations.is_empty(),
            violations,
            summary: request.summary_md.clone(),
            project_id,
        })
    }

    /// Evaluate, store, then forward a proposal.
    ///
    /// At most one row is written and at most one sink call is made.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError` if `project_id` is missing, the project does
    /// not exist, or storage fails. Rule violations and sink failures are
    /// outcomes, not errors.
    pub async fn submit(&self, request: SubmitProposal) -> Result<SubmitOutcome, WorkflowError> {
        let project_id = request.project_id()?;
        self.load_project(project_id).await?;

        let violations = self
            .evaluator
            .evaluate(&self.service, project_id, &request.candidate())
            .await?;
        if !violations.is_empty() {
            tracing::info!(
                project_id,
                violations = violations.len(),
                "proposal rejected by quality gates"
            );
            return Ok(SubmitOutcome::Rejected {
                message: REJECTION_MESSAGE.to_string(),
                violations,
            });
        }

        let payload = serde_json::to_value(&request)?;
        let proposal = self
            .service
            .create_proposal(NewProposal {
                project_id,
                summary_md: request.summary_md,
                patch_manifest_json: request.patch_manifest_json,
                linked_features: request.linked_features,
                status: ProposalStatus::Submitted,
            })
            .await?;
        tracing::info!(project_id, proposal_id = proposal.id, "proposal stored");

        match self
            .sink
            .post_proposal(&project_id.to_string(), &payload)
            .await
        {
            Ok(mcp_response) => Ok(SubmitOutcome::Submitted {
                proposal_id: proposal.id,
                mcp_response,
            }),
            Err(error) => {
                tracing::warn!(
                    proposal_id = proposal.id,
                    %error,
                    "proposal stored locally, forwarding failed"
                );
                Ok(SubmitOutcome::SubmittedLocally {
                    proposal_id: proposal.id,
                    mcp_error: error.to_string(),
                })
            }
        }
    }
}
