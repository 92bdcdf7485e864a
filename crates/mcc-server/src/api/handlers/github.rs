//! GitHub integration: repository listing, creation, and project sync.

use axum::{Json, extract::State};
use mcc_core::responses::GithubSyncResponse;
use mcc_db::repos::project::{NewProject, RepositorySync};
use mcc_remote::Repository;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::ApiQuery;
use crate::state::AppState;

fn require_token(state: &AppState) -> ApiResult<()> {
    if state.github.has_token() {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(
            "GitHub token not configured".to_string(),
        ))
    }
}

/// Sync runs only when `github.sync_enabled` is set and a token is present.
fn sync_allowed(state: &AppState) -> bool {
    state.config.github.sync_enabled && state.github.has_token()
}

pub async fn github_config(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "enabled": sync_allowed(&state),
        "has_token": state.github.has_token(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub user: Option<String>,
}

pub async fn list_repositories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Json<Vec<Repository>>> {
    require_token(&state)?;
    let repos = state
        .github
        .list_repositories(query.user.as_deref())
        .await?;
    Ok(Json(repos))
}

/// Upsert one project per repository of the authenticated user, keyed by
/// the repository's `html_url`.
///
/// Every GitHub call happens before the first write, and the writes share
/// one transaction, so a failed sync leaves the store as it was.
pub async fn sync_repositories(
    State(state): State<AppState>,
) -> ApiResult<Json<GithubSyncResponse>> {
    require_token(&state)?;
    if !sync_allowed(&state) {
        return Err(ApiError::BadRequest("GitHub sync is disabled".to_string()));
    }
    let repos = state.github.list_repositories(None).await?;

    let mut plan = Vec::with_capacity(repos.len());
    for repo in &repos {
        let known = state
            .service
            .get_project_by_repo_url(&repo.html_url)
            .await?
            .is_some();
        let languages = if known {
            Vec::new()
        } else {
            state
                .github
                .list_repository_languages(&repo.owner.login, &repo.name)
                .await?
                .into_keys()
                .collect()
        };
        plan.push(RepositorySync {
            name: repo.name.clone(),
            repo_url: repo.html_url.clone(),
            tags: repo.topics.clone(),
            languages,
        });
    }

    let summary = state.service.sync_repositories(&plan).await?;
    tracing::info!(
        synced = summary.synced,
        created = summary.created,
        total = repos.len(),
        "github sync finished"
    );
    Ok(Json(GithubSyncResponse {
        status: "success".to_string(),
        synced: summary.synced,
        created: summary.created,
        total: repos.len(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateRepositoryQuery {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub private: bool,
}

/// Create the repository on GitHub, then a local project pointing at it.
pub async fn create_repository(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CreateRepositoryQuery>,
) -> ApiResult<Json<Value>> {
    require_token(&state)?;
    let repo = state
        .github
        .create_repository(&query.name, &query.description, query.private)
        .await?;
    let project = state
        .service
        .create_project(NewProject {
            name: repo.name.clone(),
            repo_url: Some(repo.html_url.clone()),
            ..NewProject::default()
        })
        .await?;
    tracing::info!(project_id = project.id, repo = %repo.full_name, "github repository created");

    Ok(Json(json!({
        "status": "success",
        "project": project,
        "github_repo": {
            "url": repo.html_url,
            "clone_url": repo.clone_url,
        },
    })))
}
