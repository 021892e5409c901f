//! Directional commands sent to the remote device
//!
//! Each command is identified by a single ASCII byte. The byte doubles as the
//! browser key code of the key that triggers it, and the wire token is that
//! key code written out in decimal (`'W'` = 87 is sent as `"87"`).

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single control instruction for the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Drive forward (W)
    Forward,
    /// Drive backward (S)
    Backward,
    /// Turn left (A)
    Left,
    /// Turn right (D)
    Right,
    /// Stop the motors (X)
    Stop,
}

impl Command {
    /// Every command, in key order W, S, A, D, X
    pub const ALL: [Command; 5] = [
        Command::Forward,
        Command::Backward,
        Command::Left,
        Command::Right,
        Command::Stop,
    ];

    /// ASCII code of the command (also its key code)
    pub const fn code(self) -> u8 {
        match self {
            Command::Forward => b'W',
            Command::Backward => b'S',
            Command::Left => b'A',
            Command::Right => b'D',
            Command::Stop => b'X',
        }
    }

    /// Look up a command by ASCII byte or key code
    ///
    /// Lowercase letters are accepted. Returns `None` for any other byte so
    /// that the key path can ignore unrelated keys.
    pub fn from_code(code: u8) -> Option<Self> {
        match code.to_ascii_uppercase() {
            b'W' => Some(Command::Forward),
            b'S' => Some(Command::Backward),
            b'A' => Some(Command::Left),
            b'D' => Some(Command::Right),
            b'X' => Some(Command::Stop),
            _ => None,
        }
    }

    /// Look up a command by key code, rejecting anything outside the set
    pub fn try_from_code(code: u8) -> Result<Self, ProtocolError> {
        Self::from_code(code).ok_or(ProtocolError::UnknownCommand { code })
    }

    /// Look up a command by browser key code
    ///
    /// Key codes are reported for the uppercase letter, so only those match.
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        u8::try_from(key_code)
            .ok()
            .filter(u8::is_ascii_uppercase)
            .and_then(Self::from_code)
    }

    /// Decimal digit-pair token written on the wire
    pub fn wire_token(self) -> String {
        self.code().to_string()
    }

    /// Lowercase name of the command
    pub const fn name(self) -> &'static str {
        match self {
            Command::Forward => "forward",
            Command::Backward => "backward",
            Command::Left => "left",
            Command::Right => "right",
            Command::Stop => "stop",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code() as char)
    }
}

impl TryFrom<u8> for Command {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::try_from_code(code)
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    /// Accepts a name (`forward`), a key letter (`w`), or a key code (`87`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unknown = || ProtocolError::UnknownCommandName {
            name: trimmed.to_string(),
        };

        if let Some(command) = Command::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
        {
            return Ok(*command);
        }

        match trimmed.as_bytes() {
            [letter] if letter.is_ascii_alphabetic() => {
                Self::from_code(*letter).ok_or_else(unknown)
            }
            digits if !digits.is_empty() && digits.iter().all(u8::is_ascii_digit) => trimmed
                .parse::<u32>()
                .ok()
                .and_then(Self::from_key_code)
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}
