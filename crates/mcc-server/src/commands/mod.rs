use mcc_config::MccConfig;

use crate::cli::Commands;

pub mod init;
pub mod run_gates;
pub mod schema;
pub mod seed;
pub mod serve;
pub mod soc_report;
pub mod sync_mcp;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(command: Commands, config: MccConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, config).await,
        Commands::Init(args) => init::handle(&args, &config).await,
        Commands::Seed => seed::handle(&config).await,
        Commands::SyncMcp(args) => sync_mcp::handle(&args, &config).await,
        Commands::RunGates(args) => run_gates::handle(&args, &config).await,
        Commands::GenerateSocReport(args) => soc_report::handle(&args, &config).await,
        Commands::Schema(args) => schema::handle(&args),
    }
}
