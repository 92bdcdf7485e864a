use anyhow::Context;
use mcc_config::MccConfig;
use mcc_db::service::ControlService;
use mcc_server::seed::seed_demo;

use crate::output::output;

/// Handle `mcc seed`.
pub async fn handle(config: &MccConfig) -> anyhow::Result<()> {
    let service = ControlService::new_local(&config.database.path)
        .await
        .context("failed to open control center database")?;
    let summary = seed_demo(&service)
        .await
        .context("failed to seed demo data")?;
    output(&summary)
}
