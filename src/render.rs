//! Terminal presentation of link events

use async_trait::async_trait;
use rclink_core::{Direction, Error, KeyState, LinkListener, Snapshot};
use std::io::Write;

/// Prints snapshots and key state to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleRenderer {
    json: bool,
}

impl ConsoleRenderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Text printed for one snapshot
    pub fn format_snapshot(&self, snapshot: &Snapshot) -> String {
        if self.json {
            serde_json::to_string(snapshot).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
        } else {
            format!(
                "cpu_temperature: {}  speed: {}  power_supply: {}",
                snapshot.temperature, snapshot.speed, snapshot.power_supply
            )
        }
    }

    /// Text printed for a key state change
    pub fn format_key_state(state: KeyState) -> String {
        let arrow = |direction: Direction, glyph: &'static str| {
            if state.is_active(direction) {
                glyph
            } else {
                "."
            }
        };
        format!(
            "[{} {} {} {}]",
            arrow(Direction::Up, "^"),
            arrow(Direction::Down, "v"),
            arrow(Direction::Left, "<"),
            arrow(Direction::Right, ">")
        )
    }
}

#[async_trait]
impl LinkListener for ConsoleRenderer {
    async fn on_snapshot(&self, snapshot: &Snapshot) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", self.format_snapshot(snapshot));
    }

    async fn on_key_state(&self, state: KeyState) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", Self::format_key_state(state));
    }

    async fn on_error(&self, error: &Error) {
        eprintln!("link error: {}", error);
    }
}
