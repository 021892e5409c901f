//! Key highlight state handed to the presentation layer

use super::command::Command;
use serde::{Deserialize, Serialize};

/// Arrow shown on the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Arrow highlighted while `command` is held; Stop has none
    pub fn for_command(command: Command) -> Option<Self> {
        match command {
            Command::Forward => Some(Direction::Up),
            Command::Backward => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            Command::Stop => None,
        }
    }
}

/// Which arrow, if any, is currently highlighted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    /// Highlighted arrow
    pub active: Option<Direction>,
}

impl KeyState {
    /// All arrows idle
    pub const fn idle() -> Self {
        Self { active: None }
    }

    /// State after pressing the key for `command`
    pub fn pressed(command: Command) -> Self {
        Self {
            active: Direction::for_command(command),
        }
    }

    /// Check whether `direction` is highlighted
    pub fn is_active(&self, direction: Direction) -> bool {
        self.active == Some(direction)
    }
}
