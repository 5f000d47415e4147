use clap::Parser;
use tracing::{error, info};

use waypoint_lib::bootstrap::{default_config_path, init_tracing_subscriber, load_config};
use waypoint_lib::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(default_config_path);
    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => Default::default(),
    };
    init_tracing_subscriber(&config.logging)?;
    if let Some(path) = &config_path {
        info!(config = %path.display(), "waypoint starting");
    }

    if let Err(err) = cli::run(cli, config).await {
        error!(error = %err, "command failed");
        return Err(err);
    }
    Ok(())
}
