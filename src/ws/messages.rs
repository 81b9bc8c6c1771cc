use crate::session::{ErrorPayload, MeetingRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frame received from the client: `{"event": "...", "data": {...}}`
#[derive(Debug, Deserialize)]
pub struct ClientEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// `session_start` payload
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartData {
    #[serde(default, alias = "title")]
    pub meeting_title: Option<String>,
    /// Client clock in epoch millis, informational only
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedData {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartedData {
    /// Connection id, which the client uses as its session handle
    pub session_id: String,
    pub recording_id: Uuid,
    pub title: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleAck {
    pub sample_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeAck {
    pub keyframe_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionEndedData {
    pub record: MeetingRecord,
}

/// Frame sent to the client
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Connected(ConnectedData),
    SessionStarted(SessionStartedData),
    SampleAck(SampleAck),
    KeyframeAck(KeyframeAck),
    SessionEnded(SessionEndedData),
    Pong,
    Error(ErrorPayload),
}

impl ServerEvent {
    pub fn malformed(message: impl Into<String>) -> Self {
        ServerEvent::Error(ErrorPayload {
            kind: "malformed_event".to_string(),
            message: message.into(),
        })
    }
}
