//! rclink Settings Crate
//!
//! Handles the link configuration: device address, deadlines, command
//! terminator policy and telemetry polling parameters.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, CommandSettings, Config, ConnectionSettings, TelemetrySettings,
    CONFIG_FILE_NAME,
};
pub use error::{SettingsError, SettingsResult};
