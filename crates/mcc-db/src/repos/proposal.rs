//! Proposal repository.
//!
//! The gated submission workflow only ever inserts proposals; it never
//! deletes them. Status changes go through [`ProposalStatus::can_transition_to`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

use mcc_core::entities::Proposal;
use mcc_core::enums::ProposalStatus;

use crate::error::DatabaseError;
use crate::helpers::{get_json, parse_datetime, parse_enum, to_json_text, where_clause};
use crate::service::ControlService;
use crate::updates::SetClauses;
use crate::updates::proposal::ProposalUpdate;

const SELECT_COLS: &str =
    "id, project_id, summary_md, patch_manifest_json, linked_features, status, created_at, updated_at";

fn empty_manifest() -> serde_json::Value {
    serde_json::json!({})
}

/// Fields accepted when creating a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProposal {
    pub project_id: i64,
    #[serde(default)]
    pub summary_md: String,
    #[serde(default = "empty_manifest")]
    pub patch_manifest_json: serde_json::Value,
    #[serde(default)]
    pub linked_features: Vec<i64>,
    #[serde(default)]
    pub status: ProposalStatus,
}

/// Optional filters for [`ControlService::list_proposals`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalFilter {
    pub project_id: Option<i64>,
    pub status: Option<ProposalStatus>,
}

fn row_to_proposal(row: &libsql::Row) -> Result<Proposal, DatabaseError> {
    Ok(Proposal {
        id: row.get(0)?,
        project_id: row.get(1)?,
        summary_md: row.get(2)?,
        patch_manifest_json: get_json(row, 3)?,
        linked_features: get_json(row, 4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl ControlService {
    /// Insert a proposal with one `INSERT` statement.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist.
    pub async fn create_proposal(&self, new: NewProposal) -> Result<Proposal, DatabaseError> {
        self.get_project(new.project_id).await?;

        let now = Utc::now();
        let id = self
            .db()
            .insert_returning_id(
                "INSERT INTO proposals (project_id, summary_md, patch_manifest_json, linked_features, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
                libsql::params![
                    new.project_id,
                    new.summary_md.as_str(),
                    to_json_text(&new.patch_manifest_json)?,
                    to_json_text(&new.linked_features)?,
                    new.status.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(proposal_id = id, project_id = new.project_id, status = %new.status, "proposal stored");

        Ok(Proposal {
            id,
            project_id: new.project_id,
            summary_md: new.summary_md,
            patch_manifest_json: new.patch_manifest_json,
            linked_features: new.linked_features,
            status: new.status,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no proposal has this id.
    pub async fn get_proposal(&self, id: i64) -> Result<Proposal, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM proposals WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_proposal(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_proposals(
        &self,
        filter: &ProposalFilter,
    ) -> Result<Vec<Proposal>, DatabaseError> {
        let mut conds = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(project_id) = filter.project_id {
            params.push(project_id.into());
            conds.push(format!("project_id = ?{}", params.len()));
        }
        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            conds.push(format!("status = ?{}", params.len()));
        }

        let sql = format!(
            "SELECT {SELECT_COLS} FROM proposals{} ORDER BY id",
            where_clause(&conds)
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut proposals = Vec::new();
        while let Some(row) = rows.next().await? {
            proposals.push(row_to_proposal(&row)?);
        }
        Ok(proposals)
    }

    /// Number of stored proposals, optionally for one project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_proposals(&self, project_id: Option<i64>) -> Result<i64, DatabaseError> {
        let mut rows = match project_id {
            Some(id) => {
                self.db()
                    .conn()
                    .query("SELECT COUNT(*) FROM proposals WHERE project_id = ?1", [id])
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query("SELECT COUNT(*) FROM proposals", ())
                    .await?
            }
        };
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no proposal has this id, or
    /// `DatabaseError::InvalidState` for a disallowed status change.
    pub async fn update_proposal(
        &self,
        id: i64,
        update: ProposalUpdate,
    ) -> Result<Proposal, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(status) = update.status {
            let current = self.get_proposal(id).await?;
            if current.status != status && !current.status.can_transition_to(status) {
                return Err(DatabaseError::InvalidState(format!(
                    "proposal {id} cannot move from {} to {status}",
                    current.status
                )));
            }
            sets.push("status", status.as_str());
        }
        if let Some(summary_md) = update.summary_md {
            sets.push("summary_md", summary_md);
        }
        if let Some(ref manifest) = update.patch_manifest_json {
            sets.push("patch_manifest_json", to_json_text(manifest)?);
        }
        if let Some(ref linked_features) = update.linked_features {
            sets.push("linked_features", to_json_text(linked_features)?);
        }

        if sets.is_empty() {
            return self.get_proposal(id).await;
        }

        let (sql, params) = sets.into_sql("proposals", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_proposal(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_project, test_service};
    use crate::updates::proposal::ProposalUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn draft(project_id: i64) -> NewProposal {
        NewProposal {
            project_id,
            summary_md: "Add login".into(),
            patch_manifest_json: serde_json::json!({"files": ["src/auth.rs"]}),
            linked_features: vec![1, 2],
            status: ProposalStatus::Draft,
        }
    }

    #[tokio::test]
    async fn create_proposal_roundtrip() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "p").await;

        let proposal = svc.create_proposal(draft(project.id)).await.unwrap();
        let fetched = svc.get_proposal(proposal.id).await.unwrap();
        assert_eq!(fetched, proposal);
        assert_eq!(fetched.patch_manifest_json["files"][0], "src/auth.rs");
    }

    #[test]
    fn manifest_defaults_to_empty_object() {
        let new: NewProposal = serde_json::from_str(r#"{"project_id": 1}"#).unwrap();
        assert_eq!(new.patch_manifest_json, serde_json::json!({}));
        assert_eq!(new.status, ProposalStatus::Draft);
    }

    #[tokio::test]
    async fn count_and_filter() {
        let svc = test_service().await;
        let p1 = create_test_project(&svc, "p1").await;
        let p2 = create_test_project(&svc, "p2").await;
        svc.create_proposal(draft(p1.id)).await.unwrap();
        svc.create_proposal(NewProposal {
            status: ProposalStatus::Submitted,
            ..draft(p1.id)
        })
        .await
        .unwrap();
        svc.create_proposal(draft(p2.id)).await.unwrap();

        assert_eq!(svc.count_proposals(None).await.unwrap(), 3);
        assert_eq!(svc.count_proposals(Some(p1.id)).await.unwrap(), 2);

        let submitted = svc
            .list_proposals(&ProposalFilter {
                project_id: Some(p1.id),
                status: Some(ProposalStatus::Submitted),
            })
            .await
            .unwrap();
        assert_eq!(submitted.len(), 1);
    }

    #[tokio::test]
    async fn submitted_proposal_cannot_return_to_draft() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "p").await;
        let proposal = svc.create_proposal(draft(project.id)).await.unwrap();

        let submitted = svc
            .update_proposal(
                proposal.id,
                ProposalUpdateBuilder::new()
                    .status(ProposalStatus::Submitted)
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(submitted.status, ProposalStatus::Submitted);

        let result = svc
            .update_proposal(
                proposal.id,
                ProposalUpdateBuilder::new().status(ProposalStatus::Draft).build(),
            )
            .await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
    }
}
