//! Agent update repository. Records are append-only apart from deletion.

use chrono::Utc;

use mcc_core::entities::AgentUpdate;
use mcc_core::enums::UpdateSource;

use crate::error::DatabaseError;
use crate::helpers::{get_json, parse_datetime, parse_enum, to_json_text};
use crate::service::ControlService;

const SELECT_COLS: &str = "id, project_id, source, payload_json, created_at";

/// Upper bound for [`ControlService::list_recent_agent_updates`].
pub const MAX_RECENT_LIMIT: u32 = 100;

fn row_to_agent_update(row: &libsql::Row) -> Result<AgentUpdate, DatabaseError> {
    Ok(AgentUpdate {
        id: row.get(0)?,
        project_id: row.get(1)?,
        source: parse_enum(&row.get::<String>(2)?)?,
        payload_json: get_json(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl ControlService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist.
    pub async fn create_agent_update(
        &self,
        project_id: i64,
        source: UpdateSource,
        payload: serde_json::Value,
    ) -> Result<AgentUpdate, DatabaseError> {
        self.get_project(project_id).await?;

        let now = Utc::now();
        let id = self
            .db()
            .insert_returning_id(
                "INSERT INTO agent_updates (project_id, source, payload_json, created_at)
                 VALUES (?1, ?2, ?3, ?4) RETURNING id",
                libsql::params![
                    project_id,
                    source.as_str(),
                    to_json_text(&payload)?,
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(AgentUpdate {
            id,
            project_id,
            source,
            payload_json: payload,
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no update has this id.
    pub async fn get_agent_update(&self, id: i64) -> Result<AgentUpdate, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM agent_updates WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_agent_update(&row)
    }

    /// Newest updates first (by insertion order). `limit` is clamped to `1..=MAX_RECENT_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_recent_agent_updates(
        &self,
        project_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<AgentUpdate>, DatabaseError> {
        let limit = i64::from(limit.clamp(1, MAX_RECENT_LIMIT));
        let mut rows = match project_id {
            Some(project_id) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM agent_updates WHERE project_id = ?1
                             ORDER BY id DESC LIMIT ?2"
                        ),
                        libsql::params![project_id, limit],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM agent_updates
                             ORDER BY id DESC LIMIT ?1"
                        ),
                        [limit],
                    )
                    .await?
            }
        };

        let mut updates = Vec::new();
        while let Some(row) = rows.next().await? {
            updates.push(row_to_agent_update(&row)?);
        }
        Ok(updates)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no update has this id.
    pub async fn delete_agent_update(&self, id: i64) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM agent_updates WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_project, test_service};
    use serde_json::json;

    #[tokio::test]
    async fn recent_updates_newest_first() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "p").await;
        for n in 0..3 {
            svc.create_agent_update(project.id, UpdateSource::Agent, json!({"n": n}))
                .await
                .unwrap();
        }

        let recent = svc
            .list_recent_agent_updates(Some(project.id), 2)
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].payload_json, json!({"n": 2}));
        assert_eq!(recent[1].payload_json, json!({"n": 1}));
    }

    #[tokio::test]
    async fn limit_is_capped() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "p").await;
        for n in 0..105 {
            svc.create_agent_update(project.id, UpdateSource::Mcp, json!({"n": n}))
                .await
                .unwrap();
        }

        let recent = svc.list_recent_agent_updates(None, 500).await.unwrap();
        assert_eq!(recent.len(), 100);
        let zero = svc.list_recent_agent_updates(None, 0).await.unwrap();
        assert_eq!(zero.len(), 1);
    }

    #[tokio::test]
    async fn update_for_missing_project_fails() {
        let svc = test_service().await;
        let result = svc
            .create_agent_update(5, UpdateSource::Mcp, json!({}))
            .await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn delete_agent_update() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "p").await;
        let update = svc
            .create_agent_update(project.id, UpdateSource::Agent, json!({"event": "x"}))
            .await
            .unwrap();

        svc.delete_agent_update(update.id).await.unwrap();
        assert!(matches!(
            svc.get_agent_update(update.id).await,
            Err(DatabaseError::NoResult)
        ));
    }
}
