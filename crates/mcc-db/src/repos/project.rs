//! Project repository.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use mcc_core::entities::Project;

use crate::error::DatabaseError;
use crate::helpers::{get_json, get_opt_string, parse_datetime, to_json_text};
use crate::service::ControlService;
use crate::updates::SetClauses;
use crate::updates::project::{ProjectUpdate, ProjectUpdateBuilder};

const SELECT_COLS: &str = "id, name, repo_url, language_matrix, tags, created_at, updated_at";

/// Fields accepted when creating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub language_matrix: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One remote repository to mirror as a project, keyed by `repo_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySync {
    pub name: String,
    pub repo_url: String,
    pub tags: Vec<String>,
    /// Languages for a newly created project. Existing projects keep theirs.
    pub languages: Vec<String>,
}

/// Counts returned by [`ControlService::sync_repositories`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositorySyncSummary {
    pub synced: usize,
    pub created: usize,
}

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        repo_url: get_opt_string(row, 2)?,
        language_matrix: get_json(row, 3)?,
        tags: get_json(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl ControlService {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_project(&self, new: NewProject) -> Result<Project, DatabaseError> {
        let now = Utc::now();
        let id = self
            .db()
            .insert_returning_id(
                "INSERT INTO projects (name, repo_url, language_matrix, tags, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
                libsql::params![
                    new.name.as_str(),
                    new.repo_url.as_deref(),
                    to_json_text(&new.language_matrix)?,
                    to_json_text(&new.tags)?,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(project_id = id, name = %new.name, "project created");

        Ok(Project {
            id,
            name: new.name,
            repo_url: new.repo_url,
            language_matrix: new.language_matrix,
            tags: new.tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no project has this id.
    pub async fn get_project(&self, id: i64) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }

    /// Find the oldest project pointing at `repo_url`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_project_by_repo_url(
        &self,
        repo_url: &str,
    ) -> Result<Option<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE repo_url = ?1 ORDER BY id LIMIT 1"),
                [repo_url],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_project(&row)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM projects ORDER BY id"), ())
            .await?;

        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no project has this id.
    pub async fn update_project(
        &self,
        id: i64,
        update: ProjectUpdate,
    ) -> Result<Project, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name);
        }
        if let Some(repo_url) = update.repo_url {
            sets.push_opt("repo_url", repo_url);
        }
        if let Some(ref language_matrix) = update.language_matrix {
            sets.push("language_matrix", to_json_text(language_matrix)?);
        }
        if let Some(ref tags) = update.tags {
            sets.push("tags", to_json_text(tags)?);
        }

        if sets.is_empty() {
            return self.get_project(id).await;
        }

        let (sql, params) = sets.into_sql("projects", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_project(id).await
    }

    /// Upsert one project per repository in a single transaction.
    ///
    /// A project whose `repo_url` matches gets its name and tags refreshed;
    /// otherwise a project is created. Any failure rolls back every upsert.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a statement, the commit, or the rollback
    /// fails.
    pub async fn sync_repositories(
        &self,
        repos: &[RepositorySync],
    ) -> Result<RepositorySyncSummary, DatabaseError> {
        let tx = self.db().transaction().await?;
        match self.upsert_repositories(repos).await {
            Ok(summary) => {
                tx.commit().await?;
                Ok(summary)
            }
            Err(error) => {
                tx.rollback().await?;
                Err(error)
            }
        }
    }

    async fn upsert_repositories(
        &self,
        repos: &[RepositorySync],
    ) -> Result<RepositorySyncSummary, DatabaseError> {
        let mut summary = RepositorySyncSummary::default();
        for repo in repos {
            if let Some(project) = self.get_project_by_repo_url(&repo.repo_url).await? {
                let update = ProjectUpdateBuilder::new()
                    .name(repo.name.clone())
                    .tags(repo.tags.clone())
                    .build();
                self.update_project(project.id, update).await?;
                summary.synced += 1;
            } else {
                self.create_project(NewProject {
                    name: repo.name.clone(),
                    repo_url: Some(repo.repo_url.clone()),
                    language_matrix: repo
                        .languages
                        .iter()
                        .map(|lang| (lang.clone(), String::new()))
                        .collect(),
                    tags: repo.tags.clone(),
                })
                .await?;
                summary.created += 1;
            }
        }
        Ok(summary)
    }
}
