//! Command sender
//!
//! Opens a session per command, writes the command token, and closes the
//! session without reading anything back.

use crate::communication::Session;
use rclink_core::{
    Command, CommandTerminator, ConnectionTarget, LinkListenerHandle, Result, SessionTimeouts,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Sends directional commands to the device
#[derive(Debug, Clone)]
pub struct CommandSender {
    target: Arc<ConnectionTarget>,
    timeouts: SessionTimeouts,
    terminator: CommandTerminator,
}

impl CommandSender {
    /// Create a sender with the default (bare token) terminator policy
    pub fn new(target: Arc<ConnectionTarget>, timeouts: SessionTimeouts) -> Self {
        Self {
            target,
            timeouts,
            terminator: CommandTerminator::default(),
        }
    }

    /// Set the terminator appended to every command token
    pub fn with_terminator(mut self, terminator: CommandTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Terminator policy in use
    pub fn terminator(&self) -> CommandTerminator {
        self.terminator
    }

    /// Device commands are sent to
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    /// Bytes written on the wire for `command`
    pub fn encode(&self, command: Command) -> Vec<u8> {
        let mut bytes = command.wire_token().into_bytes();
        bytes.extend_from_slice(self.terminator.as_bytes());
        bytes
    }

    /// Transmit `command` and release the session
    ///
    /// No response is read. The session is closed whether or not the write
    /// succeeded.
    pub async fn send(&self, command: Command) -> Result<()> {
        let payload = self.encode(command);
        let mut session = Session::open(&self.target, self.timeouts).await?;
        let session_id = session.id();

        let written = session.write_all(&payload).await;
        session.close().await;
        written?;

        tracing::info!(session = %session_id, "Sent {} to {}", command, self.target);
        Ok(())
    }

    /// Validate a raw command byte and transmit it
    pub async fn send_code(&self, code: u8) -> Result<()> {
        let command = Command::try_from_code(code)?;
        self.send(command).await
    }

    /// Send `command` in the background
    ///
    /// Failures are logged and handed to `listener`; they never reach the
    /// caller.
    pub fn dispatch(&self, command: Command, listener: LinkListenerHandle) -> JoinHandle<()> {
        let sender = self.clone();
        tokio::spawn(async move {
            if let Err(e) = sender.send(command).await {
                tracing::warn!("Command {} not delivered: {}", command, e);
                listener.on_error(&e).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> CommandSender {
        CommandSender::new(
            Arc::new(ConnectionTarget::default()),
            SessionTimeouts::default(),
        )
    }

    #[test]
    fn test_encode_bare_token() {
        let sender = sender();
        assert_eq!(sender.encode(Command::Forward), b"87");
        assert_eq!(sender.encode(Command::Stop), b"88");
    }

    #[test]
    fn test_encode_with_crlf() {
        let sender = sender().with_terminator(CommandTerminator::CrLf);
        assert_eq!(sender.encode(Command::Left), b"65\r\n");
    }
}
