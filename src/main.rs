//! rclink - drive a robot car and read its telemetry over TCP

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use rclink::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    tracing::debug!("rclink {} (built {})", rclink::VERSION, rclink::BUILD_DATE);

    let init = matches!(cli.command, Commands::InitConfig { .. });
    let config_path = commands::resolve_config_path(cli.config);
    let mut config = if init {
        rclink::Config::default()
    } else {
        commands::load_config(config_path.as_deref())?
    };

    if let Some(host) = cli.host {
        config.connection.host = host;
    }
    if let Some(port) = cli.port {
        config.connection.port = port;
    }
    config.validate()?;

    match cli.command {
        Commands::Send { command } => commands::cmd_send(&config, command).await,
        Commands::Poll { message, json } => commands::cmd_poll(&config, message, json).await,
        Commands::Watch {
            interval_ms,
            message,
            json,
        } => commands::cmd_watch(&config, interval_ms, message, json).await,
        Commands::Drive => commands::cmd_drive(&config).await,
        Commands::InitConfig { force } => {
            let path = config_path
                .context("no config directory on this platform; pass --config <FILE>")?;
            commands::cmd_init_config(&config, &path, force)
        }
    }
}
