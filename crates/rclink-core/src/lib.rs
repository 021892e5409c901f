//! # rclink Core
//!
//! Core types, traits, and errors for rclink.
//! Provides the command set, the telemetry snapshot, connection settings,
//! the unified error type and the render-callback listener trait.

pub mod core;
pub mod data;
pub mod error;

pub use core::{LinkListener, LinkListenerHandle, NoOpListener};

pub use data::{
    Command, CommandTerminator, ConnectionTarget, Direction, KeyState, SessionTimeouts, Snapshot,
    DEFAULT_HOST, DEFAULT_PORT, MAX_RESPONSE_BYTES,
};

pub use error::{ConnectionError, Error, ProtocolError, Result};
