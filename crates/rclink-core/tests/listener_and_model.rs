use async_trait::async_trait;
use rclink_core::{
    Command, ConnectionError, Error, KeyState, LinkListener, LinkListenerHandle, NoOpListener,
    Snapshot,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct SnapshotCounter {
    count: AtomicUsize,
}

#[async_trait]
impl LinkListener for SnapshotCounter {
    async fn on_snapshot(&self, _snapshot: &Snapshot) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_partial_listener_keeps_default_methods() {
    let counter = Arc::new(SnapshotCounter::default());
    let handle: LinkListenerHandle = counter.clone();

    handle.on_snapshot(&Snapshot::new("1", "2", "3")).await;
    handle.on_key_state(KeyState::pressed(Command::Forward)).await;
    handle
        .on_error(&Error::from(ConnectionError::ConnectionFailed {
            target: "127.0.0.1:1".to_string(),
            reason: "refused".to_string(),
        }))
        .await;

    assert_eq!(counter.count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_noop_listener_accepts_everything() {
    let handle: LinkListenerHandle = Arc::new(NoOpListener);
    handle.on_snapshot(&Snapshot::default()).await;
    handle.on_key_state(KeyState::idle()).await;
}

#[test]
fn test_snapshot_json_field_names() {
    let json = serde_json::to_value(Snapshot::new("48.3 C", "12.5", "7.9V")).unwrap();
    assert_eq!(json["temperature"], "48.3 C");
    assert_eq!(json["speed"], "12.5");
    assert_eq!(json["power_supply"], "7.9V");
}

#[test]
fn test_key_state_serializes_direction_lowercase() {
    let json = serde_json::to_string(&KeyState::pressed(Command::Backward)).unwrap();
    assert_eq!(json, r#"{"active":"down"}"#);
    let idle = serde_json::to_string(&KeyState::idle()).unwrap();
    assert_eq!(idle, r#"{"active":null}"#);
}

#[test]
fn test_every_command_token_is_its_key_code() {
    for command in Command::ALL {
        assert_eq!(command.wire_token(), command.code().to_string());
        assert_eq!(Command::from_code(command.code()), Some(command));
    }
}
