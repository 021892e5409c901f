//! Data models for commands, telemetry and connection settings
//!
//! This module provides:
//! - Directional commands and their wire encoding
//! - Telemetry snapshots
//! - Connection target, session deadlines and terminator policy
//! - Key highlight state for the control surface

pub mod command;
pub mod controls;
pub mod target;
pub mod telemetry;

pub use command::Command;
pub use controls::{Direction, KeyState};
pub use target::{CommandTerminator, ConnectionTarget, SessionTimeouts, DEFAULT_HOST, DEFAULT_PORT};
pub use telemetry::{Snapshot, MAX_RESPONSE_BYTES};
