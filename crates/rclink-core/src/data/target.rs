//! Connection target and per-session limits

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default device address (the car's Raspberry Pi on the lab network)
pub const DEFAULT_HOST: &str = "192.168.50.45";

/// Default device port
pub const DEFAULT_PORT: u16 = 8080;

/// Address of the remote device
///
/// Fixed at startup and shared read-only by every session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionTarget {
    /// Hostname or IP address
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl ConnectionTarget {
    /// Create a new target
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port` string accepted by socket connect calls
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ConnectionTarget {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Deadlines for each suspend point of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimeouts {
    /// Limit on establishing the connection
    pub connect: Duration,
    /// Limit on writing an outbound message
    pub write: Duration,
    /// Limit on waiting for the response data event
    pub read: Duration,
    /// Limit on the graceful shutdown before the socket is dropped
    pub close: Duration,
}

impl Default for SessionTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_millis(3000),
            write: Duration::from_millis(1000),
            read: Duration::from_millis(5000),
            close: Duration::from_millis(500),
        }
    }
}

impl SessionTimeouts {
    /// Use the same deadline for every suspend point
    pub fn uniform(limit: Duration) -> Self {
        Self {
            connect: limit,
            write: limit,
            read: limit,
            close: limit,
        }
    }
}

/// Line terminator appended to command tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandTerminator {
    /// Send the bare token
    #[default]
    None,
    /// Append `\r\n`
    CrLf,
}

impl CommandTerminator {
    /// Bytes to append after the token
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            CommandTerminator::None => b"",
            CommandTerminator::CrLf => b"\r\n",
        }
    }
}

impl fmt::Display for CommandTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::CrLf => write!(f, "crlf"),
        }
    }
}
