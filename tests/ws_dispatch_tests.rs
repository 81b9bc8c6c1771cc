// Tests for the WebSocket event dispatcher
//
// Frames are fed straight into `dispatch`, so no socket is needed; the JSON
// replies are checked the way the mobile client reads them.

use anyhow::Result;
use serde_json::{json, Value};
use visisec_backend::session::SessionRegistry;
use visisec_backend::ws::dispatch;

async fn send(registry: &SessionRegistry, conn: &str, frame: Value) -> Result<Value> {
    let reply = dispatch(registry, conn, &frame.to_string()).await;
    Ok(serde_json::to_value(&reply)?)
}

#[tokio::test]
async fn test_full_session_over_events() -> Result<()> {
    let registry = SessionRegistry::default();

    let started = send(
        &registry,
        "conn-1",
        json!({"event": "session_start", "data": {"meetingTitle": "Design sync", "timestamp": 1760000000000i64}}),
    )
    .await?;
    assert_eq!(started["event"], "session_started");
    assert_eq!(started["data"]["sessionId"], "conn-1");
    assert_eq!(started["data"]["title"], "Design sync");
    let recording_id = started["data"]["recordingId"]
        .as_str()
        .expect("recordingId is a string")
        .to_string();

    let ack = send(
        &registry,
        "conn-1",
        json!({"event": "sensor_data", "data": {"sessionId": "conn-1", "acceleration": {"x": 0.1}}}),
    )
    .await?;
    assert_eq!(ack, json!({"event": "sample_ack", "data": {"sampleCount": 1}}));

    let ack = send(
        &registry,
        "conn-1",
        json!({"event": "keyframe", "data": {"source": "BACK", "width": 1920, "height": 1080}}),
    )
    .await?;
    assert_eq!(ack, json!({"event": "keyframe_ack", "data": {"keyframeCount": 1}}));

    let ended = send(&registry, "conn-1", json!({"event": "session_end", "data": {}})).await?;
    assert_eq!(ended["event"], "session_ended");
    assert_eq!(ended["data"]["record"]["recording_id"], recording_id.as_str());
    assert_eq!(ended["data"]["record"]["sensor_sample_count"], 1);
    assert_eq!(ended["data"]["record"]["keyframe_count"], 1);
    assert_eq!(ended["data"]["record"]["status"], "completed");
    assert_eq!(ended["data"]["record"]["end_reason"], "ended");

    Ok(())
}

#[tokio::test]
async fn test_session_start_without_data_uses_default_title() -> Result<()> {
    let registry = SessionRegistry::default();

    let started = send(&registry, "conn-1", json!({"event": "session_start"})).await?;
    assert_eq!(started["event"], "session_started");
    assert_eq!(started["data"]["title"], "Untitled Meeting");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_start_reports_invalid_state() -> Result<()> {
    let registry = SessionRegistry::default();

    send(&registry, "conn-1", json!({"event": "session_start"})).await?;
    let reply = send(&registry, "conn-1", json!({"event": "session_start"})).await?;

    assert_eq!(reply["event"], "error");
    assert_eq!(reply["data"]["kind"], "invalid_state");
    assert_eq!(registry.active_count().await, 1);

    Ok(())
}

#[tokio::test]
async fn test_telemetry_before_start_reports_unknown_session() -> Result<()> {
    let registry = SessionRegistry::default();

    let reply = send(&registry, "conn-2", json!({"event": "keyframe", "data": {}})).await?;
    assert_eq!(reply["event"], "error");
    assert_eq!(reply["data"]["kind"], "unknown_session");

    let reply = send(&registry, "conn-2", json!({"event": "session_end"})).await?;
    assert_eq!(reply["data"]["kind"], "unknown_session");

    assert_eq!(registry.active_count().await, 0);

    Ok(())
}

#[tokio::test]
async fn test_malformed_frames_do_not_break_the_session() -> Result<()> {
    let registry = SessionRegistry::default();
    send(&registry, "conn-1", json!({"event": "session_start"})).await?;

    let reply = serde_json::to_value(dispatch(&registry, "conn-1", "not json").await)?;
    assert_eq!(reply["event"], "error");
    assert_eq!(reply["data"]["kind"], "malformed_event");

    let reply = send(&registry, "conn-1", json!({"event": "teleport"})).await?;
    assert_eq!(reply["data"]["kind"], "malformed_event");

    let reply = send(
        &registry,
        "conn-1",
        json!({"event": "session_start", "data": {"meetingTitle": 42}}),
    )
    .await?;
    assert_eq!(reply["data"]["kind"], "malformed_event");

    // Session is still live and accepting telemetry
    let ack = send(&registry, "conn-1", json!({"event": "sensor_data", "data": {"x": 1}})).await?;
    assert_eq!(ack["data"]["sampleCount"], 1);

    Ok(())
}

#[tokio::test]
async fn test_ping_gets_pong() -> Result<()> {
    let registry = SessionRegistry::default();

    let reply = send(&registry, "conn-1", json!({"event": "ping"})).await?;
    assert_eq!(reply, json!({"event": "pong"}));

    Ok(())
}

#[tokio::test]
async fn test_sample_acks_saturate_at_bound() -> Result<()> {
    let registry = SessionRegistry::default();
    send(&registry, "conn-1", json!({"event": "session_start"})).await?;

    let mut last = Value::Null;
    for i in 0..1005 {
        last = send(&registry, "conn-1", json!({"event": "sensor_data", "data": {"i": i}})).await?;
    }
    assert_eq!(last["data"]["sampleCount"], 1000);

    Ok(())
}
