//! Telemetry snapshot reported by the device

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest response chunk a poll will read
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Three-field telemetry result from one poll
///
/// Fields are passed through as the raw text the device sent; nothing is
/// parsed into numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// CPU temperature line (e.g. "48.3 C")
    pub temperature: String,
    /// Speed line (e.g. "12.5")
    pub speed: String,
    /// Power supply line (e.g. "7.9V")
    pub power_supply: String,
}

impl Snapshot {
    /// Create a snapshot from its three fields
    pub fn new(
        temperature: impl Into<String>,
        speed: impl Into<String>,
        power_supply: impl Into<String>,
    ) -> Self {
        Self {
            temperature: temperature.into(),
            speed: speed.into(),
            power_supply: power_supply.into(),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temperature={} speed={} power_supply={}",
            self.temperature, self.speed, self.power_supply
        )
    }
}
