//! Inbound telemetry path: request, parse, render

pub mod parser;
pub mod poller;
pub mod scheduler;

pub use parser::{parse_snapshot, split_lines, SNAPSHOT_FIELDS};
pub use poller::{PollState, TelemetryPoller, DEFAULT_READ_BUFFER, REQUEST_TERMINATOR};
pub use scheduler::{PollHandle, PollScheduler, PollStats};
