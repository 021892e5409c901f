mod common;

use common::{
    answer_once, bind_device, fast_timeouts, read_request, read_until_closed, refused_target,
    RecordingListener,
};
use rclink_communication::TelemetryPoller;
use rclink_core::{SessionTimeouts, Snapshot};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn test_poll_returns_snapshot() {
    let (listener, target) = bind_device().await;
    let device = answer_once(listener, b"42\n120\nOK\n");

    let poller = TelemetryPoller::new(target, fast_timeouts());
    let snapshot = poller.poll("status").await.unwrap();

    assert_eq!(snapshot, Snapshot::new("42", "120", "OK"));

    let (request, trailing) = device.await.unwrap();
    assert_eq!(request, "status\r\n");
    assert!(trailing.is_empty());
}

#[tokio::test]
async fn test_poll_device_format() {
    let (listener, target) = bind_device().await;
    let device = answer_once(listener, b"51.12 C\n0.0\n8.21V\n");

    let poller = TelemetryPoller::new(target, fast_timeouts());
    let snapshot = poller.poll("hello").await.unwrap();

    assert_eq!(snapshot.temperature, "51.12 C");
    assert_eq!(snapshot.speed, "0.0");
    assert_eq!(snapshot.power_supply, "8.21V");
    device.await.unwrap();
}

#[tokio::test]
async fn test_two_line_payload_is_malformed_and_session_released() {
    let (listener, target) = bind_device().await;
    let device = answer_once(listener, b"42\n120\n");

    let poller = TelemetryPoller::new(target, fast_timeouts());
    let err = poller.poll("status").await.unwrap_err();
    assert!(err.is_malformed_payload());

    // answer_once only finishes after it reads end-of-stream
    let (_, trailing) = device.await.unwrap();
    assert!(trailing.is_empty());
}

#[tokio::test]
async fn test_refused_connection_is_connection_failed() {
    let poller = TelemetryPoller::new(refused_target().await, fast_timeouts());

    let err = poller.poll("status").await.unwrap_err();
    assert!(err.is_connection_failed());
}

#[tokio::test]
async fn test_remote_close_before_data_is_connection_closed() {
    let (listener, target) = bind_device().await;
    let device = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await;
        drop(stream);
    });

    let poller = TelemetryPoller::new(target, fast_timeouts());
    let err = poller.poll("status").await.unwrap_err();

    assert!(err.is_connection_closed());
    device.await.unwrap();
}

#[tokio::test]
async fn test_silent_device_times_out_and_session_released() {
    let (listener, target) = bind_device().await;
    let device = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await;
        read_until_closed(&mut stream).await
    });

    let timeouts = SessionTimeouts {
        read: Duration::from_millis(100),
        ..fast_timeouts()
    };
    let poller = TelemetryPoller::new(target, timeouts);
    let err = poller.poll("status").await.unwrap_err();

    assert!(err.is_timeout());
    assert!(device.await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_polls_are_independent() {
    let (listener, target) = bind_device().await;
    let device = tokio::spawn(async move {
        let mut handlers = Vec::new();
        for _ in 0..2 {
            let (mut stream, _) = listener.accept().await.unwrap();
            handlers.push(tokio::spawn(async move {
                let request = read_request(&mut stream).await;
                let name = request.trim_end().to_string();
                // Hold both sessions open at once before answering.
                tokio::time::sleep(Duration::from_millis(50)).await;
                let response = format!("{name}-temp\n{name}-speed\n{name}-power\n");
                stream.write_all(response.as_bytes()).await.unwrap();
                read_until_closed(&mut stream).await;
            }));
        }
        for handler in handlers {
            handler.await.unwrap();
        }
    });

    let poller = TelemetryPoller::new(target, fast_timeouts());
    let (left, right) = tokio::join!(poller.poll("left"), poller.poll("right"));

    assert_eq!(
        left.unwrap(),
        Snapshot::new("left-temp", "left-speed", "left-power")
    );
    assert_eq!(
        right.unwrap(),
        Snapshot::new("right-temp", "right-speed", "right-power")
    );
    device.await.unwrap();
}

#[tokio::test]
async fn test_poll_and_render_delivers_to_listener() {
    let (listener, target) = bind_device().await;
    let device = answer_once(listener, b"42\n120\nOK\n");

    let poller = TelemetryPoller::new(target, fast_timeouts());
    let recorder = RecordingListener::default();
    let snapshot = poller.poll_and_render("status", &recorder).await;

    assert_eq!(snapshot, Some(Snapshot::new("42", "120", "OK")));
    assert_eq!(recorder.snapshots(), vec![Snapshot::new("42", "120", "OK")]);
    assert!(recorder.errors().is_empty());
    device.await.unwrap();
}

#[tokio::test]
async fn test_poll_and_render_reports_errors() {
    let poller = TelemetryPoller::new(refused_target().await, fast_timeouts());
    let recorder = RecordingListener::default();

    let snapshot = poller.poll_and_render("status", &recorder).await;

    assert!(snapshot.is_none());
    assert!(recorder.snapshots().is_empty());
    assert_eq!(recorder.errors().len(), 1);
}
