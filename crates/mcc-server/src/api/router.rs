//! API router configuration.

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use mcc_config::ServerConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::state::AppState;

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Projects
        .route(
            "/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(handlers::projects::get_project).patch(handlers::projects::update_project),
        )
        // Features
        .route(
            "/features",
            get(handlers::features::list_features).post(handlers::features::create_feature),
        )
        .route(
            "/features/{id}",
            get(handlers::features::get_feature).patch(handlers::features::update_feature),
        )
        // Specifications
        .route(
            "/specs",
            get(handlers::specs::list_specs).post(handlers::specs::create_spec),
        )
        .route(
            "/specs/{id}",
            get(handlers::specs::get_spec).patch(handlers::specs::update_spec),
        )
        // Refactor plans
        .route(
            "/refactors",
            get(handlers::refactors::list_refactors).post(handlers::refactors::create_refactor),
        )
        .route(
            "/refactors/{id}",
            get(handlers::refactors::get_refactor).patch(handlers::refactors::update_refactor),
        )
        // ADRs
        .route(
            "/adrs",
            get(handlers::adrs::list_adrs).post(handlers::adrs::create_adr),
        )
        .route(
            "/adrs/{id}",
            get(handlers::adrs::get_adr).patch(handlers::adrs::update_adr),
        )
        // Rules
        .route(
            "/rules",
            get(handlers::rules::list_rules).post(handlers::rules::create_rule),
        )
        .route(
            "/rules/{id}",
            get(handlers::rules::get_rule).patch(handlers::rules::update_rule),
        )
        // Proposals
        .route(
            "/proposals",
            get(handlers::proposals::list_proposals).post(handlers::proposals::create_proposal),
        )
        .route("/proposals/preview", post(handlers::proposals::preview_proposal))
        .route("/proposals/submit", post(handlers::proposals::submit_proposal))
        .route("/proposals/{id}", get(handlers::proposals::get_proposal))
        // Reports
        .route("/reports/soc", get(handlers::reports::soc_report))
        .route("/reports/quality", get(handlers::reports::quality_report))
        .route("/reports/violations", get(handlers::reports::violations_report))
        // Agents
        .route("/agents/recent", get(handlers::agents::recent_updates))
        // MCP
        .route("/mcp/config", get(handlers::mcp::mcp_config))
        .route("/mcp/updates", post(handlers::mcp::receive_update))
        .route("/mcp/sync", post(handlers::mcp::sync_features))
        // GitHub
        .route("/github/config", get(handlers::github::github_config))
        .route(
            "/github/repositories",
            get(handlers::github::list_repositories).post(handlers::github::create_repository),
        )
        .route("/github/sync", post(handlers::github::sync_repositories))
        // Documents
        .route("/documents/upload", post(handlers::documents::upload_document))
        .route(
            "/documents/ingest/markdown",
            post(handlers::documents::ingest_markdown),
        )
        .route("/documents/bulk-ingest", post(handlers::documents::bulk_ingest))
        .route("/documents/list", get(handlers::documents::list_documents))
        .route(
            "/documents/{id}",
            get(handlers::documents::get_document).delete(handlers::documents::delete_document),
        );

    let cors = cors_layer(&state.config.server);

    Router::new()
        .route("/health", get(handlers::system::health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%origin, %error, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
