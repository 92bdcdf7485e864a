//! Feature repository.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use mcc_core::entities::Feature;
use mcc_core::enums::FeatureStatus;

use crate::error::DatabaseError;
use crate::helpers::{get_json, parse_datetime, parse_enum, to_json_text, where_clause};
use crate::service::ControlService;
use crate::updates::SetClauses;
use crate::updates::feature::FeatureUpdate;

const SELECT_COLS: &str = "id, project_id, title, description_md, status, priority, labels, mcp_ids, created_at, updated_at";

const fn default_priority() -> i64 {
    3
}

/// Fields accepted when creating a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeature {
    pub project_id: i64,
    pub title: String,
    #[serde(default)]
    pub description_md: String,
    #[serde(default)]
    pub status: FeatureStatus,
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub mcp_ids: Vec<String>,
}

impl NewFeature {
    #[must_use]
    pub fn new(project_id: i64, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description_md: String::new(),
            status: FeatureStatus::default(),
            priority: default_priority(),
            labels: Vec::new(),
            mcp_ids: Vec::new(),
        }
    }
}

/// Optional filters for [`ControlService::list_features`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureFilter {
    pub project_id: Option<i64>,
    pub status: Option<FeatureStatus>,
    /// Matches features whose `labels` list contains this exact label.
    pub label: Option<String>,
}

fn row_to_feature(row: &libsql::Row) -> Result<Feature, DatabaseError> {
    Ok(Feature {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description_md: row.get(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        priority: row.get(5)?,
        labels: get_json(row, 6)?,
        mcp_ids: get_json(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

impl ControlService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist.
    pub async fn create_feature(&self, new: NewFeature) -> Result<Feature, DatabaseError> {
        self.get_project(new.project_id).await?;

        let now = Utc::now();
        let id = self
            .db()
            .insert_returning_id(
                "INSERT INTO features (project_id, title, description_md, status, priority, labels, mcp_ids, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING id",
                libsql::params![
                    new.project_id,
                    new.title.as_str(),
                    new.description_md.as_str(),
                    new.status.as_str(),
                    new.priority,
                    to_json_text(&new.labels)?,
                    to_json_text(&new.mcp_ids)?,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Feature {
            id,
            project_id: new.project_id,
            title: new.title,
            description_md: new.description_md,
            status: new.status,
            priority: new.priority,
            labels: new.labels,
            mcp_ids: new.mcp_ids,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no feature has this id.
    pub async fn get_feature(&self, id: i64) -> Result<Feature, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM features WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_feature(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_features(&self, filter: &FeatureFilter) -> Result<Vec<Feature>, DatabaseError> {
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
        if let Some(ref label) = filter.label {
            params.push(label.clone().into());
            conds.push(format!(
                "EXISTS (SELECT 1 FROM json_each(features.labels) WHERE json_each.value = ?{})",
                params.len()
            ));
        }

        let sql = format!(
            "SELECT {SELECT_COLS} FROM features{} ORDER BY priority, id",
            where_clause(&conds)
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut features = Vec::new();
        while let Some(row) = rows.next().await? {
            features.push(row_to_feature(&row)?);
        }
        Ok(features)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no feature has this id.
    pub async fn update_feature(
        &self,
        id: i64,
        update: FeatureUpdate,
    ) -> Result<Feature, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(title) = update.title {
            sets.push("title", title);
        }
        if let Some(description_md) = update.description_md {
            sets.push("description_md", description_md);
        }
        if let Some(status) = update.status {
            sets.push("status", status.as_str());
        }
        if let Some(priority) = update.priority {
            sets.push("priority", priority);
        }
        if let Some(ref labels) = update.labels {
            sets.push("labels", to_json_text(labels)?);
        }
        if let Some(ref mcp_ids) = update.mcp_ids {
            sets.push("mcp_ids", to_json_text(mcp_ids)?);
        }

        if sets.is_empty() {
            return self.get_feature(id).await;
        }

        let (sql, params) = sets.into_sql("features", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_feature(id).await
    }
}
