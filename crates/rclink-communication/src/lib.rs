//! # rclink Communication
//!
//! Transport for the remote-control link.
//! Each command and each telemetry poll runs on its own short-lived TCP
//! session; nothing is pooled, and every session is released on all exit
//! paths.

pub mod command;
pub mod communication;
pub mod telemetry;

pub use command::{CommandSender, ControlPad};
pub use communication::Session;
pub use telemetry::{
    parse_snapshot, PollHandle, PollScheduler, PollState, PollStats, TelemetryPoller,
};
