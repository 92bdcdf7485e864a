//! Refactor plan repository.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use mcc_core::entities::RefactorPlan;
use mcc_core::enums::{RefactorScope, RefactorStatus, RiskLevel};

use crate::error::DatabaseError;
use crate::helpers::{get_json, parse_datetime, parse_enum, to_json_text, where_clause};
use crate::service::ControlService;
use crate::updates::SetClauses;
use crate::updates::refactor::RefactorPlanUpdate;

const SELECT_COLS: &str =
    "id, project_id, scope, rationale_md, soc_findings, risk_level, status, created_at, updated_at";

/// Fields accepted when creating a refactor plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRefactorPlan {
    pub project_id: i64,
    #[serde(default)]
    pub scope: RefactorScope,
    #[serde(default)]
    pub rationale_md: String,
    #[serde(default)]
    pub soc_findings: Vec<String>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub status: RefactorStatus,
}

/// Optional filters for [`ControlService::list_refactor_plans`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefactorPlanFilter {
    pub project_id: Option<i64>,
    pub status: Option<RefactorStatus>,
}

fn row_to_refactor_plan(row: &libsql::Row) -> Result<RefactorPlan, DatabaseError> {
    Ok(RefactorPlan {
        id: row.get(0)?,
        project_id: row.get(1)?,
        scope: parse_enum(&row.get::<String>(2)?)?,
        rationale_md: row.get(3)?,
        soc_findings: get_json(row, 4)?,
        risk_level: parse_enum(&row.get::<String>(5)?)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl ControlService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist.
    pub async fn create_refactor_plan(
        &self,
        new: NewRefactorPlan,
    ) -> Result<RefactorPlan, DatabaseError> {
        self.get_project(new.project_id).await?;

        let now = Utc::now();
        let id = self
            .db()
            .insert_returning_id(
                "INSERT INTO refactor_plans (project_id, scope, rationale_md, soc_findings, risk_level, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
                libsql::params![
                    new.project_id,
                    new.scope.as_str(),
                    new.rationale_md.as_str(),
                    to_json_text(&new.soc_findings)?,
                    new.risk_level.as_str(),
                    new.status.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(RefactorPlan {
            id,
            project_id: new.project_id,
            scope: new.scope,
            rationale_md: new.rationale_md,
            soc_findings: new.soc_findings,
            risk_level: new.risk_level,
            status: new.status,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no plan has this id.
    pub async fn get_refactor_plan(&self, id: i64) -> Result<RefactorPlan, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM refactor_plans WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_refactor_plan(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_refactor_plans(
        &self,
        filter: &RefactorPlanFilter,
    ) -> Result<Vec<RefactorPlan>, DatabaseError> {
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
            "SELECT {SELECT_COLS} FROM refactor_plans{} ORDER BY id",
            where_clause(&conds)
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut plans = Vec::new();
        while let Some(row) = rows.next().await? {
            plans.push(row_to_refactor_plan(&row)?);
        }
        Ok(plans)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no plan has this id.
    pub async fn update_refactor_plan(
        &self,
        id: i64,
        update: RefactorPlanUpdate,
    ) -> Result<RefactorPlan, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(scope) = update.scope {
            sets.push("scope", scope.as_str());
        }
        if let Some(rationale_md) = update.rationale_md {
            sets.push("rationale_md", rationale_md);
        }
        if let Some(ref soc_findings) = update.soc_findings {
            sets.push("soc_findings", to_json_text(soc_findings)?);
        }
        if let Some(risk_level) = update.risk_level {
            sets.push("risk_level", risk_level.as_str());
        }
        if let Some(status) = update.status {
            sets.push("status", status.as_str());
        }

        if sets.is_empty() {
            return self.get_refactor_plan(id).await;
        }

        let (sql, params) = sets.into_sql("refactor_plans", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_refactor_plan(id).await
    }
}
