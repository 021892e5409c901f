//! Subcommand implementations

use anyhow::{bail, Context, Result};
use rclink::{
    default_config_path, Command, CommandSender, Config, ConsoleRenderer, ControlPad,
    LinkListenerHandle, PollScheduler, TelemetryPoller,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Config file for this run: `--config`, else the platform default if there is one
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| match default_config_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("{}; using built-in defaults", e);
            None
        }
    })
}

/// Load `path`, or defaults when there is no file to read
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_or_default(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn command_sender(config: &Config) -> CommandSender {
    CommandSender::new(
        Arc::new(config.connection_target()),
        config.session_timeouts(),
    )
    .with_terminator(config.command.terminator)
}

fn telemetry_poller(config: &Config) -> TelemetryPoller {
    TelemetryPoller::new(
        Arc::new(config.connection_target()),
        config.session_timeouts(),
    )
    .with_read_buffer_size(config.telemetry.read_buffer_size)
}

pub async fn cmd_send(config: &Config, command: Command) -> Result<()> {
    let sender = command_sender(config);
    sender
        .send(command)
        .await
        .with_context(|| format!("sending {} to {}", command, sender.target()))?;
    println!("sent {}", command);
    Ok(())
}

pub async fn cmd_poll(config: &Config, message: Option<String>, json: bool) -> Result<()> {
    let request = message.unwrap_or_else(|| config.telemetry.request.clone());
    let renderer = ConsoleRenderer::new(json);

    match telemetry_poller(config)
        .poll_and_render(&request, &renderer)
        .await
    {
        Some(_) => Ok(()),
        None => bail!("telemetry poll to {} failed", config.connection_target()),
    }
}

pub async fn cmd_watch(
    config: &Config,
    interval_ms: Option<u64>,
    message: Option<String>,
    json: bool,
) -> Result<()> {
    let request = message.unwrap_or_else(|| config.telemetry.request.clone());
    let interval = interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.telemetry.poll_interval());
    let listener: LinkListenerHandle = Arc::new(ConsoleRenderer::new(json));

    let handle = PollScheduler::start(telemetry_poller(config), request, interval, listener);

    tokio::signal::ctrl_c()
        .await
        .context("waiting for Ctrl-C")?;

    let stats = handle.stop().await;
    eprintln!(
        "{} polls completed, {} failed",
        stats.completed, stats.failed
    );
    Ok(())
}

pub async fn cmd_drive(config: &Config) -> Result<()> {
    let renderer: LinkListenerHandle = Arc::new(ConsoleRenderer::new(false));
    let pad = ControlPad::new(command_sender(config), renderer);

    eprintln!("w/a/s/d to steer, x to stop, Ctrl-D to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = Vec::new();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        for key in line.chars().filter(|c| !c.is_whitespace()) {
            if let Some(handle) = pad.tap(key).await {
                in_flight.push(handle);
            }
        }
        in_flight.retain(|handle| !handle.is_finished());
    }

    for handle in in_flight {
        if let Err(e) = handle.await {
            tracing::warn!("Command task ended abnormally: {}", e);
        }
    }
    Ok(())
}

pub fn cmd_init_config(config: &Config, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    config
        .save_to_file(path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
