//! Shared application state for the HTTP handlers.

use std::sync::Arc;

use mcc_config::MccConfig;
use mcc_db::error::DatabaseError;
use mcc_db::service::ControlService;
use mcc_gate::{GateEvaluator, ProposalSink, ProposalWorkflow};
use mcc_remote::{GitHubClient, McpClient};

/// Everything a handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ControlService>,
    pub workflow: Arc<ProposalWorkflow>,
    pub mcp: Arc<McpClient>,
    pub github: Arc<GitHubClient>,
    pub config: Arc<MccConfig>,
}

impl AppState {
    /// Open the configured database and build clients from `config`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open(config: MccConfig) -> Result<Self, DatabaseError> {
        let service = ControlService::new_local(&config.database.path).await?;
        Ok(Self::new(Arc::new(service), config))
    }

    /// Build state over an existing service with the default (empty) gate
    /// registry.
    #[must_use]
    pub fn new(service: Arc<ControlService>, config: MccConfig) -> Self {
        Self::with_evaluator(service, config, GateEvaluator::default())
    }

    /// Build state with a specific gate evaluator.
    #[must_use]
    pub fn with_evaluator(
        service: Arc<ControlService>,
        config: MccConfig,
        evaluator: GateEvaluator,
    ) -> Self {
        let mcp = Arc::new(McpClient::from_config(&config.mcp));
        let github = Arc::new(GitHubClient::from_config(&config.github));
        let workflow = Arc::new(ProposalWorkflow::new(
            Arc::clone(&service),
            evaluator,
            Arc::clone(&mcp) as Arc<dyn ProposalSink>,
        ));
        Self {
            service,
            workflow,
            mcp,
            github,
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn evaluator(&self) -> &GateEvaluator {
        self.workflow.evaluator()
    }
}
