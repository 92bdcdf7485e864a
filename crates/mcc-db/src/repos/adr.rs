//! ADR repository.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use mcc_core::entities::Adr;
use mcc_core::enums::AdrStatus;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum, where_clause};
use crate::service::ControlService;
use crate::updates::SetClauses;
use crate::updates::adr::AdrUpdate;

const SELECT_COLS: &str =
    "id, project_id, title, context_md, decision_md, consequences_md, status, created_at, updated_at";

/// Fields accepted when creating an ADR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdr {
    pub project_id: i64,
    pub title: String,
    #[serde(default)]
    pub context_md: String,
    #[serde(default)]
    pub decision_md: String,
    #[serde(default)]
    pub consequences_md: String,
    #[serde(default)]
    pub status: AdrStatus,
}

/// Optional filters for [`ControlService::list_adrs`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdrFilter {
    pub project_id: Option<i64>,
    pub status: Option<AdrStatus>,
}

fn row_to_adr(row: &libsql::Row) -> Result<Adr, DatabaseError> {
    Ok(Adr {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        context_md: row.get(3)?,
        decision_md: row.get(4)?,
        consequences_md: row.get(5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl ControlService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist.
    pub async fn create_adr(&self, new: NewAdr) -> Result<Adr, DatabaseError> {
        self.get_project(new.project_id).await?;

        let now = Utc::now();
        let id = self
            .db()
            .insert_returning_id(
                "INSERT INTO adrs (project_id, title, context_md, decision_md, consequences_md, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
                libsql::params![
                    new.project_id,
                    new.title.as_str(),
                    new.context_md.as_str(),
                    new.decision_md.as_str(),
                    new.consequences_md.as_str(),
                    new.status.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Adr {
            id,
            project_id: new.project_id,
            title: new.title,
            context_md: new.context_md,
            decision_md: new.decision_md,
            consequences_md: new.consequences_md,
            status: new.status,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no ADR has this id.
    pub async fn get_adr(&self, id: i64) -> Result<Adr, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM adrs WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_adr(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_adrs(&self, filter: &AdrFilter) -> Result<Vec<Adr>, DatabaseError> {
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
            "SELECT {SELECT_COLS} FROM adrs{} ORDER BY id",
            where_clause(&conds)
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut adrs = Vec::new();
        while let Some(row) = rows.next().await? {
            adrs.push(row_to_adr(&row)?);
        }
        Ok(adrs)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no ADR has this id.
    pub async fn update_adr(&self, id: i64, update: AdrUpdate) -> Result<Adr, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(title) = update.title {
            sets.push("title", title);
        }
        if let Some(context_md) = update.context_md {
            sets.push("context_md", context_md);
        }
        if let Some(decision_md) = update.decision_md {
            sets.push("decision_md", decision_md);
        }
        if let Some(consequences_md) = update.consequences_md {
            sets.push("consequences_md", consequences_md);
        }
        if let Some(status) = update.status {
            sets.push("status", status.as_str());
        }

        if sets.is_empty() {
            return self.get_adr(id).await;
        }

        let (sql, params) = sets.into_sql("adrs", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_adr(id).await
    }
}
