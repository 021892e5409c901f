mod common;

use common::{bind_device, fast_timeouts, read_until_closed, refused_target, RecordingListener};
use rclink_communication::{CommandSender, ControlPad};
use rclink_core::{Direction, KeyState};
use std::sync::Arc;

#[tokio::test]
async fn test_key_down_highlights_and_sends() {
    let (listener, target) = bind_device().await;
    let device = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_until_closed(&mut stream).await
    });

    let recorder = Arc::new(RecordingListener::default());
    let pad = ControlPad::new(CommandSender::new(target, fast_timeouts()), recorder.clone());

    let handle = pad.on_key_down(87).await.expect("W is a command key");
    handle.await.unwrap();

    assert_eq!(device.await.unwrap(), b"87");
    let states = recorder.key_states();
    assert_eq!(states.len(), 1);
    assert!(states[0].is_active(Direction::Up));
}

#[tokio::test]
async fn test_unknown_key_is_ignored() {
    let recorder = Arc::new(RecordingListener::default());
    let pad = ControlPad::new(
        CommandSender::new(refused_target().await, fast_timeouts()),
        recorder.clone(),
    );

    assert!(pad.on_key_down(13).await.is_none());
    assert!(recorder.key_states().is_empty());
    assert!(recorder.errors().is_empty());
}

#[tokio::test]
async fn test_key_up_resets_without_network() {
    let recorder = Arc::new(RecordingListener::default());
    let pad = ControlPad::new(
        CommandSender::new(refused_target().await, fast_timeouts()),
        recorder.clone(),
    );

    pad.on_key_up(65).await;

    assert_eq!(recorder.key_states(), vec![KeyState::idle()]);
    assert!(recorder.errors().is_empty());
}

#[tokio::test]
async fn test_stop_key_sends_without_highlight() {
    let (listener, target) = bind_device().await;
    let device = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_until_closed(&mut stream).await
    });

    let recorder = Arc::new(RecordingListener::default());
    let pad = ControlPad::new(CommandSender::new(target, fast_timeouts()), recorder.clone());

    let handle = pad.tap('x').await.expect("X is a command key");
    handle.await.unwrap();

    assert_eq!(device.await.unwrap(), b"88");
    assert_eq!(recorder.key_states(), vec![KeyState::idle(), KeyState::idle()]);
}

#[tokio::test]
async fn test_failed_dispatch_reaches_listener() {
    let recorder = Arc::new(RecordingListener::default());
    let pad = ControlPad::new(
        CommandSender::new(refused_target().await, fast_timeouts()),
        recorder.clone(),
    );

    let handle = pad.on_key_down(83).await.expect("S is a command key");
    handle.await.unwrap();

    assert_eq!(recorder.errors().len(), 1);
}
