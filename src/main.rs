use anyhow::Result;
use clap::Parser;
use tracing::debug;

use logcost::app_state::build_app_state;
use logcost::cli::Cli;
use logcost::core::config::app_config::AppConfig;
use logcost::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env must be loaded before the log filter and config are read
    let env_file = dotenvy::dotenv().ok();
    let _log_guard = init_tracing();
    if let Some(path) = env_file {
        debug!("Loaded environment from {}", path.display());
    }

    let config = AppConfig::from_env()?;
    debug!("Configuration: {:?}", config);

    cli.run(build_app_state(config)).await
}
