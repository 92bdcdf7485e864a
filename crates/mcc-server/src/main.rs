use anyhow::Context;
use clap::Parser;
use mcc_config::MccConfig;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("mcc error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    if let cli::Commands::Schema(args) = &cli.command {
        init_tracing(cli.quiet, cli.verbose)?;
        return commands::schema::handle(args);
    }

    let config = MccConfig::load_with_dotenv(cli.config.as_deref())
        .context("failed to load mcc configuration")?;
    // general.debug behaves like --verbose; --quiet still wins.
    init_tracing(cli.quiet, cli.verbose || config.general.debug)?;

    commands::dispatch(cli.command, config).await
}

fn default_level(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("MCC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level(quiet, verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
