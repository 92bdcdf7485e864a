use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `mcc` binary.
#[derive(Debug, Parser)]
#[command(name = "mcc", version, about = "MCP Control Center")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of .mcc/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Create the database and write a default config file.
    Init(InitArgs),
    /// Insert demo data.
    Seed,
    /// Count the features the MCP server holds for a project.
    SyncMcp(SyncMcpArgs),
    /// Evaluate blocking rules and exit non-zero on violations.
    RunGates(RunGatesArgs),
    /// Print the separation-of-concerns report as JSON.
    GenerateSocReport(SocReportArgs),
    /// Print the JSON Schema of an entity type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Override server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing .mcc/config.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SyncMcpArgs {
    /// Project name or id on the MCP server
    pub project: String,
}

#[derive(Clone, Debug, Args)]
pub struct RunGatesArgs {
    /// Only evaluate this project
    #[arg(long)]
    pub project_id: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct SocReportArgs {
    /// Only report on this project
    #[arg(long)]
    pub project_id: Option<i64>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Project,
    Feature,
    Specification,
    RefactorPlan,
    Adr,
    Rule,
    Proposal,
    AgentUpdate,
    Violation,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
