//! # rclink
//!
//! Remote-control link for a small robot car:
//! - Directional commands (W/S/A/D/X) sent as short TCP messages
//! - Telemetry snapshots (temperature, speed, power supply) polled back
//! - One short-lived session per command or poll, always released
//!
//! ## Architecture
//!
//! rclink is organized as a workspace with multiple crates:
//!
//! 1. **rclink-core** - Command set, snapshot, connection target, errors, listener trait
//! 2. **rclink-communication** - Sessions, command sender, telemetry poller, scheduler
//! 3. **rclink-settings** - Configuration files and validation
//! 4. **rclink** - Console renderer, logging setup and the `rclink` binary

pub mod render;

pub use rclink_core::{
    Command, CommandTerminator, ConnectionError, ConnectionTarget, Direction, Error, KeyState,
    LinkListener, LinkListenerHandle, NoOpListener, ProtocolError, Result, SessionTimeouts,
    Snapshot,
};

pub use rclink_communication::{
    CommandSender, ControlPad, PollHandle, PollScheduler, PollState, PollStats, Session,
    TelemetryPoller,
};

pub use rclink_settings::{
    default_config_path, CommandSettings, Config, ConnectionSettings, SettingsError,
    TelemetrySettings,
};

pub use render::ConsoleRenderer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout carries only rendered telemetry
/// - RUST_LOG environment variable support
/// - `debug` level when `verbose` is set and RUST_LOG is absent, `info` otherwise
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
