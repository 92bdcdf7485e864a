use anyhow::Context;
use mcc_config::MccConfig;
use mcc_remote::McpClient;
use serde_json::json;

use crate::cli::SyncMcpArgs;
use crate::output::output;

/// Handle `mcc sync-mcp <project>`.
pub async fn handle(args: &SyncMcpArgs, config: &MccConfig) -> anyhow::Result<()> {
    let client = McpClient::from_config(&config.mcp);
    let features = client
        .list_features(&args.project)
        .await
        .with_context(|| format!("failed to sync features for '{}'", args.project))?;

    tracing::info!(project = %args.project, count = features.len(), "mcp features fetched");
    output(&json!({
        "status": "synced",
        "project": args.project,
        "features_count": features.len(),
    }))
}
