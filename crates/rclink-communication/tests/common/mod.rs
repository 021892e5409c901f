//! Shared helpers: a loopback stand-in for the car and a recording listener

#![allow(dead_code)]

use async_trait::async_trait;
use rclink_core::{ConnectionTarget, Error, KeyState, LinkListener, SessionTimeouts, Snapshot};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Bind a loopback listener and return it with its target
pub async fn bind_device() -> (TcpListener, Arc<ConnectionTarget>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, Arc::new(ConnectionTarget::new("127.0.0.1", port)))
}

/// Target with nothing listening on it
pub async fn refused_target() -> Arc<ConnectionTarget> {
    let (listener, target) = bind_device().await;
    drop(listener);
    target
}

/// Short deadlines so failing tests fail fast
pub fn fast_timeouts() -> SessionTimeouts {
    SessionTimeouts {
        connect: Duration::from_millis(1000),
        write: Duration::from_millis(500),
        read: Duration::from_millis(500),
        close: Duration::from_millis(200),
    }
}

/// Read until the client releases the connection
pub async fn read_until_closed(stream: &mut TcpStream) -> Vec<u8> {
    let mut received = Vec::new();
    stream.read_to_end(&mut received).await.unwrap();
    received
}

/// Read one request line (up to and including `\r\n`)
pub async fn read_request(stream: &mut TcpStream) -> String {
    let mut request = Vec::new();
    let mut byte = [0u8; 1];
    while !request.ends_with(b"\r\n") {
        let n = stream.read(&mut byte).await.unwrap();
        if n == 0 {
            break;
        }
        request.push(byte[0]);
    }
    String::from_utf8(request).unwrap()
}

/// Accept one connection, answer its request with `response`, and report
/// the request text plus whatever arrived after the answer
pub fn answer_once(
    listener: TcpListener,
    response: &'static [u8],
) -> tokio::task::JoinHandle<(String, Vec<u8>)> {
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        stream.write_all(response).await.unwrap();
        let trailing = read_until_closed(&mut stream).await;
        (request, trailing)
    })
}

/// Listener that records everything it is handed
#[derive(Default)]
pub struct RecordingListener {
    pub snapshots: Mutex<Vec<Snapshot>>,
    pub key_states: Mutex<Vec<KeyState>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.snapshots.lock().unwrap().clone()
    }

    pub fn key_states(&self) -> Vec<KeyState> {
        self.key_states.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkListener for RecordingListener {
    async fn on_snapshot(&self, snapshot: &Snapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }

    async fn on_key_state(&self, state: KeyState) {
        self.key_states.lock().unwrap().push(state);
    }

    async fn on_error(&self, error: &Error) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}
