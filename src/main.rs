use anyhow::{Context, Result};
use clap::Parser;
use compliancecheck::application::{Cli, CommandExecutor, PriceAnalysisService};
use compliancecheck::shared::config::ConfigLoader;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: CLI args > Config file > Defaults
    let config = ConfigLoader::load_or_default(cli.config.as_deref()).context("load configuration")?;
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());

    tracing_subscriber::fmt()
        .with_env_filter(log_level.as_str())
        .with_writer(std::io::stderr)
        .init();
    debug!("Configuration: {:?}", config);

    let executor = CommandExecutor::new(PriceAnalysisService::new(config));
    executor.execute(cli.command).await?;
    Ok(())
}
