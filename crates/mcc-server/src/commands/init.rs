use std::path::Path;

use anyhow::Context;
use mcc_config::MccConfig;
use mcc_db::service::ControlService;
use serde_json::json;

use crate::cli::InitArgs;
use crate::output::output;

const CONFIG_DIR: &str = ".mcc";
const CONFIG_FILE: &str = ".mcc/config.toml";

/// Handle `mcc init`: run migrations and write a default project config.
pub async fn handle(args: &InitArgs, config: &MccConfig) -> anyhow::Result<()> {
    ControlService::new_local(&config.database.path)
        .await
        .with_context(|| format!("failed to initialize database at {}", config.database.path))?;
    tracing::info!(path = %config.database.path, "database ready");

    let config_path = Path::new(CONFIG_FILE);
    let wrote_config = if config_path.exists() && !args.force {
        tracing::info!(path = CONFIG_FILE, "config already present, leaving it alone");
        false
    } else {
        std::fs::create_dir_all(CONFIG_DIR)
            .with_context(|| format!("failed to create {CONFIG_DIR}"))?;
        let rendered = toml::to_string_pretty(&MccConfig::default())
            .context("failed to render default config")?;
        std::fs::write(config_path, rendered)
            .with_context(|| format!("failed to write {CONFIG_FILE}"))?;
        true
    };

    output(&json!({
        "database": config.database.path,
        "config": CONFIG_FILE,
        "config_written": wrote_config,
    }))
}
