use std::time::Duration;

use hiveclock_core::config::SessionConfig;
use hiveclock_core::error::SessionError;
use hiveclock_core::session;
use integration_tests::harness::{Behaviour, WsUpstream, init_test_tracing};
use pretty_assertions::assert_eq;
use tracing::Level;

fn config(url: &str, interval: Duration) -> SessionConfig {
    SessionConfig::new(url.parse().expect("bad upstream url"), interval)
        .expect("invalid session config")
}

#[tokio::test]
async fn clock_frames_reach_the_upstream() {
    let mut upstream = WsUpstream::start(Behaviour::SendThenHold(Vec::new())).await;
    let cfg = config(&upstream.url(), Duration::from_millis(100));

    let socket = session::connect(&cfg).await.expect("connect failed");
    let driver = tokio::spawn(session::run(socket, cfg));

    let mut frames = Vec::new();
    for _ in 0..3 {
        let frame = tokio::time::timeout(Duration::from_secs(2), upstream.inbound.recv())
            .await
            .expect("timed out waiting for a clock frame")
            .expect("upstream channel closed");
        frames.push(frame);
    }

    driver.abort();

    for frame in frames {
        let text = frame.into_text().expect("clock frame is not text");
        let record: serde_json::Value = serde_json::from_str(&text).expect("clock frame not JSON");

        assert_eq!(record["type"], "clock");

        let stamp = record["data"].as_str().expect("clock data must be a string");
        assert!(
            chrono::DateTime::parse_from_rfc3339(stamp).is_ok(),
            "clock data is not a valid timestamp: {stamp}"
        );
    }
}

#[tokio::test]
async fn immediate_close_surfaces_a_connection_fault() {
    let upstream = WsUpstream::start(Behaviour::CloseAfterHandshake).await;
    let cfg = config(&upstream.url(), Duration::from_secs(60));

    let socket = session::connect(&cfg).await.expect("connect failed");

    let result = tokio::time::timeout(Duration::from_secs(2), session::run(socket, cfg))
        .await
        .expect("session hung after the remote closed");

    // Depending on timing the fault is observed on the receive half (close
    // frame) or the send half (write to a closed socket). Both are fatal.
    assert!(matches!(
        result,
        Err(SessionError::ConnectionClosed | SessionError::Transport(_))
    ));
}

#[tokio::test]
async fn undecodable_frame_is_reported_and_skipped() {
    let events = init_test_tracing();

    let upstream = WsUpstream::start(Behaviour::SendThenHold(vec![
        "not-json".to_string(),
        r#"{"type":"clock","data":"2024-01-01T00:00:00"}"#.to_string(),
    ]))
    .await;
    let cfg = config(&upstream.url(), Duration::from_secs(60));

    let socket = session::connect(&cfg).await.expect("connect failed");
    let driver = tokio::spawn(session::run(socket, cfg));

    // Give the receive loop time to drain both frames.
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(
        !driver.is_finished(),
        "session terminated on a malformed frame"
    );
    driver.abort();

    let events = events.lock().unwrap();

    let notice = events
        .iter()
        .position(|event| event.level == Level::WARN && event.mentions("not-json"))
        .expect("no decode notice for the malformed frame");

    let received = events
        .iter()
        .position(|event| {
            event.level == Level::INFO
                && event.mentions("clock")
                && event.mentions("2024-01-01T00:00:00")
        })
        .expect("decoded record was not reported with its fields intact");

    assert!(
        notice < received,
        "decode notice should precede the decoded record"
    );
}
