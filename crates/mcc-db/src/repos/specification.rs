//! Specification repository. Ingested documents are stored here too.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use mcc_core::entities::Specification;
use mcc_core::enums::SpecificationKind;

use crate::error::DatabaseError;
use crate::helpers::{get_json, parse_datetime, parse_enum, to_json_text, where_clause};
use crate::service::ControlService;
use crate::updates::SetClauses;
use crate::updates::specification::SpecificationUpdate;

const SELECT_COLS: &str = "id, project_id, kind, version, doc_md, links, created_at, updated_at";

fn default_version() -> String {
    "1.0".to_string()
}

/// Fields accepted when creating a specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSpecification {
    pub project_id: i64,
    #[serde(default)]
    pub kind: SpecificationKind,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub doc_md: String,
    #[serde(default)]
    pub links: Vec<String>,
}

impl NewSpecification {
    #[must_use]
    pub fn new(project_id: i64, doc_md: impl Into<String>) -> Self {
        Self {
            project_id,
            kind: SpecificationKind::default(),
            version: default_version(),
            doc_md: doc_md.into(),
            links: Vec::new(),
        }
    }
}

/// Optional filters for [`ControlService::list_specifications`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecificationFilter {
    pub project_id: Option<i64>,
    pub kind: Option<SpecificationKind>,
}

fn row_to_specification(row: &libsql::Row) -> Result<Specification, DatabaseError> {
    Ok(Specification {
        id: row.get(0)?,
        project_id: row.get(1)?,
        kind: parse_enum(&row.get::<String>(2)?)?,
        version: row.get(3)?,
        doc_md: row.get(4)?,
        links: get_json(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl ControlService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist.
    pub async fn create_specification(
        &self,
        new: NewSpecification,
    ) -> Result<Specification, DatabaseError> {
        self.get_project(new.project_id).await?;

        let now = Utc::now();
        let id = self
            .db()
            .insert_returning_id(
                "INSERT INTO specifications (project_id, kind, version, doc_md, links, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
                libsql::params![
                    new.project_id,
                    new.kind.as_str(),
                    new.version.as_str(),
                    new.doc_md.as_str(),
                    to_json_text(&new.links)?,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Specification {
            id,
            project_id: new.project_id,
            kind: new.kind,
            version: new.version,
            doc_md: new.doc_md,
            links: new.links,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no specification has this id.
    pub async fn get_specification(&self, id: i64) -> Result<Specification, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM specifications WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_specification(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_specifications(
        &self,
        filter: &SpecificationFilter,
    ) -> Result<Vec<Specification>, DatabaseError> {
        let mut conds = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(project_id) = filter.project_id {
            params.push(project_id.into());
            conds.push(format!("project_id = ?{}", params.len()));
        }
        if let Some(kind) = filter.kind {
            params.push(kind.as_str().into());
            conds.push(format!("kind = ?{}", params.len()));
        }

        let sql = format!(
            "SELECT {SELECT_COLS} FROM specifications{} ORDER BY id",
            where_clause(&conds)
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut specs = Vec::new();
        while let Some(row) = rows.next().await? {
            specs.push(row_to_specification(&row)?);
        }
        Ok(specs)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no specification has this id.
    pub async fn update_specification(
        &self,
        id: i64,
        update: SpecificationUpdate,
    ) -> Result<Specification, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(kind) = update.kind {
            sets.push("kind", kind.as_str());
        }
        if let Some(version) = update.version {
            sets.push("version", version);
        }
        if let Some(doc_md) = update.doc_md {
            sets.push("doc_md", doc_md);
        }
        if let Some(ref links) = update.links {
            sets.push("links", to_json_text(links)?);
        }

        if sets.is_empty() {
            return self.get_specification(id).await;
        }

        let (sql, params) = sets.into_sql("specifications", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_specification(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no specification has this id.
    pub async fn delete_specification(&self, id: i64) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM specifications WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        tracing::debug!(spec_id = id, "specification deleted");
        Ok(())
    }
}
