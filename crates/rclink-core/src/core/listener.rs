//! Link listener interface
//!
//! The render callback the transport calls into. Presentation code (a
//! terminal, a web page, a test recorder) implements this trait instead of
//! the transport reaching into UI state directly.

use crate::data::{KeyState, Snapshot};
use crate::error::Error;
use async_trait::async_trait;
use std::sync::Arc;

/// Listener trait for link events
///
/// All methods default to doing nothing, so implementors only override
/// what they render.
#[async_trait]
pub trait LinkListener: Send + Sync {
    /// Called with each successfully parsed telemetry snapshot
    async fn on_snapshot(&self, _snapshot: &Snapshot) {}

    /// Called when the highlighted key changes
    async fn on_key_state(&self, _state: KeyState) {}

    /// Called when a send or poll fails
    async fn on_error(&self, _error: &Error) {}
}

/// Shared handle to a listener
pub type LinkListenerHandle = Arc<dyn LinkListener>;

/// Listener that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpListener;

#[async_trait]
impl LinkListener for NoOpListener {}
