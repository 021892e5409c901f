//! Scoped connection to the remote device
//!
//! A [`Session`] is one TCP connection that lives for exactly one command
//! send or one poll exchange. Every suspend point is bounded by the matching
//! [`SessionTimeouts`] deadline.
//!
//! Release is guaranteed: [`Session::close`] performs a graceful shutdown
//! followed by dropping the socket, and dropping a session that was never
//! closed still releases its descriptor.

use rclink_core::{
    ConnectionError, ConnectionTarget, Error, Result, SessionTimeouts, MAX_RESPONSE_BYTES,
};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use uuid::Uuid;

/// One short-lived connection, owned by the operation that opened it
pub struct Session<S = TcpStream>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    id: Uuid,
    target: Arc<ConnectionTarget>,
    timeouts: SessionTimeouts,
    stream: Option<S>,
}

impl Session<TcpStream> {
    /// Connect to `target` within `timeouts.connect`
    ///
    /// Refusal, resolution failure and an expired deadline all surface as
    /// [`ConnectionError::ConnectionFailed`].
    pub async fn open(target: &Arc<ConnectionTarget>, timeouts: SessionTimeouts) -> Result<Self> {
        let connect = TcpStream::connect(target.address());
        let stream = match timeout(timeouts.connect, connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                tracing::warn!("Failed to connect to {}: {}", target, e);
                return Err(ConnectionError::ConnectionFailed {
                    target: target.to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
            Err(_) => {
                tracing::warn!(
                    "Connect to {} timed out after {}ms",
                    target,
                    timeouts.connect.as_millis()
                );
                return Err(ConnectionError::ConnectionFailed {
                    target: target.to_string(),
                    reason: format!(
                        "connect timed out after {}ms",
                        timeouts.connect.as_millis()
                    ),
                }
                .into());
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!("Could not disable Nagle on {}: {}", target, e);
        }

        Ok(Self::from_stream(stream, Arc::clone(target), timeouts))
    }
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already connected stream
    pub fn from_stream(
        stream: S,
        target: Arc<ConnectionTarget>,
        timeouts: SessionTimeouts,
    ) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "Session opened to {}", target);
        Self {
            id,
            target,
            timeouts,
            stream: Some(stream),
        }
    }

    /// Unique id used to attribute log lines to this session
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Device this session talks to
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    /// Whether the stream is still held
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Write every byte of `data` and flush, within `timeouts.write`
    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let limit = self.timeouts.write;
        let id = self.id;
        let target = self.target.to_string();
        let stream = self.stream.as_mut().ok_or_else(|| closed(&target, "write"))?;

        let write = async {
            stream.write_all(data).await?;
            stream.flush().await
        };

        match timeout(limit, write).await {
            Ok(Ok(())) => {
                tracing::trace!(session = %id, "Wrote {} bytes", data.len());
                Ok(())
            }
            Ok(Err(e)) => Err(io_error(&target, e)),
            Err(_) => Err(timed_out(&target, "write", limit.as_millis())),
        }
    }

    /// Wait for a single data event of at most `max` bytes, within `timeouts.read`
    ///
    /// A zero-length read means the remote closed the connection and is
    /// reported as [`ConnectionError::ConnectionClosed`]. `max` is clamped to
    /// `1..=MAX_RESPONSE_BYTES`.
    pub async fn read_chunk(&mut self, max: usize) -> Result<Vec<u8>> {
        let limit = self.timeouts.read;
        let id = self.id;
        let target = self.target.to_string();
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| closed(&target, "response data"))?;

        let mut buf = vec![0u8; max.clamp(1, MAX_RESPONSE_BYTES)];
        match timeout(limit, stream.read(&mut buf)).await {
            Ok(Ok(0)) => {
                tracing::debug!(session = %id, "Remote closed {} before sending data", target);
                Err(closed(&target, "response data"))
            }
            Ok(Ok(n)) => {
                buf.truncate(n);
                tracing::trace!(session = %id, "Received {} bytes", n);
                Ok(buf)
            }
            Ok(Err(e)) => Err(io_error(&target, e)),
            Err(_) => Err(timed_out(&target, "read", limit.as_millis())),
        }
    }

    /// Graceful shutdown bounded by `timeouts.close`, then release the socket
    ///
    /// Shutdown failures are logged and otherwise ignored; the socket is
    /// released either way.
    pub async fn close(mut self) {
        let Some(mut stream) = self.stream.take() else {
            return;
        };

        match timeout(self.timeouts.close, stream.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!(session = %self.id, "Shutdown of {} failed: {}", self.target, e)
            }
            Err(_) => tracing::debug!(
                session = %self.id,
                "Shutdown of {} timed out, dropping socket",
                self.target
            ),
        }

        drop(stream);
        tracing::debug!(session = %self.id, "Session to {} closed", self.target);
    }
}

impl<S> Drop for Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn drop(&mut self) {
        if self.stream.take().is_some() {
            tracing::debug!(
                session = %self.id,
                "Session to {} dropped without close, socket released",
                self.target
            );
        }
    }
}

impl<S> std::fmt::Debug for Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("open", &self.stream.is_some())
            .finish()
    }
}

fn closed(target: &str, stage: &str) -> Error {
    ConnectionError::ConnectionClosed {
        target: target.to_string(),
        stage: stage.to_string(),
    }
    .into()
}

fn io_error(target: &str, e: std::io::Error) -> Error {
    ConnectionError::Io {
        target: target.to_string(),
        reason: e.to_string(),
    }
    .into()
}

fn timed_out(target: &str, operation: &str, timeout_ms: u128) -> Error {
    ConnectionError::Timeout {
        target: target.to_string(),
        operation: operation.to_string(),
        timeout_ms: u64::try_from(timeout_ms).unwrap_or(u64::MAX),
    }
    .into()
}
