//! Key-down / key-up wiring for the control surface

use super::sender::CommandSender;
use rclink_core::{Command, KeyState, LinkListenerHandle};
use tokio::task::JoinHandle;

/// Turns key events into commands and key highlight updates
pub struct ControlPad {
    sender: CommandSender,
    listener: LinkListenerHandle,
}

impl ControlPad {
    pub fn new(sender: CommandSender, listener: LinkListenerHandle) -> Self {
        Self { sender, listener }
    }

    /// Highlight the matching arrow and dispatch its command
    ///
    /// Keys outside the command set are ignored and return `None`.
    pub async fn on_key_down(&self, key_code: u32) -> Option<JoinHandle<()>> {
        let Some(command) = Command::from_key_code(key_code) else {
            tracing::trace!("Ignoring key code {}", key_code);
            return None;
        };

        self.listener.on_key_state(KeyState::pressed(command)).await;
        Some(self.sender.dispatch(command, self.listener.clone()))
    }

    /// Reset every arrow to idle; no network traffic
    pub async fn on_key_up(&self, key_code: u32) {
        tracing::trace!("Key {} released", key_code);
        self.listener.on_key_state(KeyState::idle()).await;
    }

    /// Press and release the key for a typed character
    ///
    /// Returns the dispatch handle when the character maps to a command.
    pub async fn tap(&self, key: char) -> Option<JoinHandle<()>> {
        let key_code = u32::from(key.to_ascii_uppercase());
        let handle = self.on_key_down(key_code).await;
        self.on_key_up(key_code).await;
        handle
    }
}
