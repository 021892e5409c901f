//! Configuration for rclink
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Connection settings (device address, per-step deadlines)
//! - Command settings (terminator policy)
//! - Telemetry settings (request text, poll interval, buffer size)

use crate::error::{SettingsError, SettingsResult};
use rclink_core::{
    CommandTerminator, ConnectionTarget, SessionTimeouts, DEFAULT_HOST, DEFAULT_PORT,
    MAX_RESPONSE_BYTES,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name used inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Device hostname or IP address
    pub host: String,
    /// Device TCP port
    pub port: u16,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Write timeout in milliseconds
    pub write_timeout_ms: u64,
    /// Response timeout in milliseconds
    pub read_timeout_ms: u64,
    /// Graceful close timeout in milliseconds
    pub close_timeout_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        let timeouts = SessionTimeouts::default();
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: millis(timeouts.connect),
            write_timeout_ms: millis(timeouts.write),
            read_timeout_ms: millis(timeouts.read),
            close_timeout_ms: millis(timeouts.close),
        }
    }
}

/// Command settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSettings {
    /// Terminator appended to command tokens
    pub terminator: CommandTerminator,
}

/// Telemetry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Request text sent with every poll
    pub request: String,
    /// Interval between periodic polls in milliseconds
    pub poll_interval_ms: u64,
    /// Largest response chunk accepted, in bytes
    pub read_buffer_size: usize,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            request: "status".to_string(),
            poll_interval_ms: 50,
            read_buffer_size: 1024,
        }
    }
}

impl TelemetrySettings {
    /// Poll interval as a duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionSettings,
    /// Command settings
    pub command: CommandSettings,
    /// Telemetry settings
    pub telemetry: TelemetrySettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Validate connection settings
        if self.connection.host.trim().is_empty() {
            return Err(SettingsError::invalid("connection.host", "must not be empty"));
        }

        if self.connection.port == 0 {
            return Err(SettingsError::invalid("connection.port", "must be > 0"));
        }

        for (key, value) in [
            ("connection.connect_timeout_ms", self.connection.connect_timeout_ms),
            ("connection.write_timeout_ms", self.connection.write_timeout_ms),
            ("connection.read_timeout_ms", self.connection.read_timeout_ms),
            ("connection.close_timeout_ms", self.connection.close_timeout_ms),
        ] {
            if value == 0 {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }

        // Validate telemetry settings
        if self.telemetry.poll_interval_ms == 0 {
            return Err(SettingsError::invalid("telemetry.poll_interval_ms", "must be > 0"));
        }

        if self.telemetry.read_buffer_size == 0 {
            return Err(SettingsError::invalid("telemetry.read_buffer_size", "must be > 0"));
        }

        if self.telemetry.read_buffer_size > MAX_RESPONSE_BYTES {
            return Err(SettingsError::invalid(
                "telemetry.read_buffer_size",
                format!("must be <= {}", MAX_RESPONSE_BYTES),
            ));
        }

        Ok(())
    }

    /// Device address from the connection section
    pub fn connection_target(&self) -> ConnectionTarget {
        ConnectionTarget::new(self.connection.host.trim(), self.connection.port)
    }

    /// Per-step deadlines from the connection section
    pub fn session_timeouts(&self) -> SessionTimeouts {
        SessionTimeouts {
            connect: Duration::from_millis(self.connection.connect_timeout_ms),
            write: Duration::from_millis(self.connection.write_timeout_ms),
            read: Duration::from_millis(self.connection.read_timeout_ms),
            close: Duration::from_millis(self.connection.close_timeout_ms),
        }
    }
}

/// Default location of the config file (`<config dir>/rclink/config.toml`)
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("rclink").join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no config directory on this platform".to_string())
        })
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
