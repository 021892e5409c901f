//! Telemetry payload parser
//!
//! The device answers a poll with newline-separated text:
//!
//! ```text
//! 48.3 C
//! 12.5
//! 7.9V
//! ```
//!
//! Line 0 is the temperature, line 1 the speed and line 2 the power supply.
//! Lines past the third are ignored. A payload with fewer than three lines is
//! rejected rather than producing a partially filled snapshot.

use rclink_core::{ProtocolError, Snapshot};

/// Number of lines a snapshot is built from
pub const SNAPSHOT_FIELDS: usize = 3;

/// Split decoded text into lines
///
/// `\r\n` and `\n` both end a line, and a trailing line terminator does not
/// produce an empty final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Parse one response chunk into a [`Snapshot`]
///
/// Invalid UTF-8 is replaced rather than rejected; the fields are opaque text.
pub fn parse_snapshot(payload: &[u8]) -> Result<Snapshot, ProtocolError> {
    let text = String::from_utf8_lossy(payload);
    let lines = split_lines(&text);

    match lines.as_slice() {
        [temperature, speed, power_supply, ..] => {
            Ok(Snapshot::new(*temperature, *speed, *power_supply))
        }
        _ => Err(ProtocolError::MalformedPayload {
            expected: SNAPSHOT_FIELDS,
            found: lines.len(),
        }),
    }
}
