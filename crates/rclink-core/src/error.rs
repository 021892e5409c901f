//! Error handling for rclink
//!
//! Provides the error types shared by every layer of the link:
//! - Connection errors (socket lifecycle, deadlines)
//! - Protocol errors (payload parsing, command validation)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Connection error type
///
/// Represents failures of a single session against the remote device.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The connect attempt was refused, could not be resolved, or timed out
    #[error("Failed to connect to {target}: {reason}")]
    ConnectionFailed {
        /// The `host:port` that was dialled.
        target: String,
        /// The reason the connection could not be established.
        reason: String,
    },

    /// The remote end closed the session before a full response arrived
    #[error("Connection to {target} closed by remote before {stage}")]
    ConnectionClosed {
        /// The `host:port` of the session.
        target: String,
        /// What the session was waiting for when it was closed.
        stage: String,
    },

    /// A suspend point exceeded its deadline
    #[error("{operation} on {target} timed out after {timeout_ms}ms")]
    Timeout {
        /// The `host:port` of the session.
        target: String,
        /// The operation that timed out (connect, write, read, close).
        operation: String,
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// I/O failure on an established session
    #[error("I/O error on {target}: {reason}")]
    Io {
        /// The `host:port` of the session.
        target: String,
        /// The reason for the I/O error.
        reason: String,
    },
}

/// Protocol error type
///
/// Represents malformed traffic on an otherwise healthy session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The telemetry payload did not contain every expected field
    #[error("Malformed telemetry payload: expected {expected} lines, found {found}")]
    MalformedPayload {
        /// Number of lines a snapshot needs.
        expected: usize,
        /// Number of lines that were received.
        found: usize,
    },

    /// A command byte outside the command set
    #[error("Unknown command code {code}")]
    UnknownCommand {
        /// The rejected code.
        code: u8,
    },

    /// A command name that does not match any command
    #[error("Unknown command '{name}'")]
    UnknownCommandName {
        /// The rejected name.
        name: String,
    },
}

/// Main error type for rclink
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Protocol error
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl Error {
    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Connection(ConnectionError::Timeout { .. }))
    }

    /// Check if this is a connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// Check if this is a protocol error
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }

    /// Check if the remote refused or never answered the connect attempt
    pub fn is_connection_failed(&self) -> bool {
        matches!(
            self,
            Error::Connection(ConnectionError::ConnectionFailed { .. })
        )
    }

    /// Check if the remote closed the session early
    pub fn is_connection_closed(&self) -> bool {
        matches!(
            self,
            Error::Connection(ConnectionError::ConnectionClosed { .. })
        )
    }

    /// Check if the telemetry payload was missing fields
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, Error::Protocol(ProtocolError::MalformedPayload { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
