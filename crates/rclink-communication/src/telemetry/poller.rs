//! Telemetry poller
//!
//! One poll is a short exchange on its own session:
//!
//! 1. **Connecting** - open a session to the device
//! 2. **Sending** - write the request followed by `\r\n`
//! 3. **AwaitingData** - wait for exactly one data event
//! 4. **Parsing** - split the chunk into temperature, speed and power supply
//! 5. **Closing** - shut the session down, then release it
//!
//! The poll ends in **Done** with a [`Snapshot`] or in **Failed** with the
//! error that stopped it. The session is closed on every path.

use super::parser::parse_snapshot;
use crate::communication::Session;
use rclink_core::{
    ConnectionTarget, LinkListener, Result, SessionTimeouts, Snapshot, MAX_RESPONSE_BYTES,
};
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::Instrument;

/// Terminator appended to every poll request
pub const REQUEST_TERMINATOR: &str = "\r\n";

/// Largest response chunk read per poll (the device's receive size)
pub const DEFAULT_READ_BUFFER: usize = 1024;

/// Stage of a single poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Connecting,
    Sending,
    AwaitingData,
    Parsing,
    Closing,
    Done,
    Failed,
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Sending => write!(f, "sending"),
            Self::AwaitingData => write!(f, "awaiting data"),
            Self::Parsing => write!(f, "parsing"),
            Self::Closing => write!(f, "closing"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Requests telemetry snapshots from the device
#[derive(Debug, Clone)]
pub struct TelemetryPoller {
    target: Arc<ConnectionTarget>,
    timeouts: SessionTimeouts,
    read_buffer_size: usize,
}

impl TelemetryPoller {
    pub fn new(target: Arc<ConnectionTarget>, timeouts: SessionTimeouts) -> Self {
        Self {
            target,
            timeouts,
            read_buffer_size: DEFAULT_READ_BUFFER,
        }
    }

    /// Set the largest chunk accepted as a response
    ///
    /// Clamped to `1..=MAX_RESPONSE_BYTES`.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.clamp(1, MAX_RESPONSE_BYTES);
        self
    }

    /// Device polled by this poller
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    /// Bytes written on the wire for `request`
    pub fn encode_request(request: &str) -> Vec<u8> {
        format!("{}{}", request, REQUEST_TERMINATOR).into_bytes()
    }

    /// Run one poll against the configured target
    pub async fn poll(&self, request: &str) -> Result<Snapshot> {
        let span = tracing::debug_span!("poll", target = %self.target);
        async {
            enter(PollState::Connecting);
            let session = match Session::open(&self.target, self.timeouts).await {
                Ok(session) => session,
                Err(e) => {
                    enter(PollState::Failed);
                    return Err(e);
                }
            };
            self.exchange(session, request).await
        }
        .instrument(span)
        .await
    }

    /// Run the send/await/parse/close steps on an open session
    ///
    /// Takes ownership of the session so it is closed before returning,
    /// whatever the outcome.
    pub async fn exchange<S>(&self, mut session: Session<S>, request: &str) -> Result<Snapshot>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let session_id = session.id();
        let outcome = self.request_response(&mut session, request).await;

        enter(PollState::Closing);
        session.close().await;

        match outcome {
            Ok(snapshot) => {
                enter(PollState::Done);
                tracing::debug!(session = %session_id, "Telemetry: {}", snapshot);
                Ok(snapshot)
            }
            Err(e) => {
                enter(PollState::Failed);
                tracing::warn!(session = %session_id, "Telemetry poll failed: {}", e);
                Err(e)
            }
        }
    }

    /// Poll and hand the result to `listener`
    ///
    /// Errors are reported through `listener.on_error` and never returned.
    pub async fn poll_and_render(
        &self,
        request: &str,
        listener: &dyn LinkListener,
    ) -> Option<Snapshot> {
        match self.poll(request).await {
            Ok(snapshot) => {
                listener.on_snapshot(&snapshot).await;
                Some(snapshot)
            }
            Err(e) => {
                listener.on_error(&e).await;
                None
            }
        }
    }

    async fn request_response<S>(&self, session: &mut Session<S>, request: &str) -> Result<Snapshot>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        enter(PollState::Sending);
        session.write_all(&Self::encode_request(request)).await?;

        enter(PollState::AwaitingData);
        let chunk = session.read_chunk(self.read_buffer_size).await?;

        enter(PollState::Parsing);
        Ok(parse_snapshot(&chunk)?)
    }
}

fn enter(state: PollState) {
    tracing::debug!(state = %state, "Poll state");
}
