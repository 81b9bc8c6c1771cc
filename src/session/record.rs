use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single telemetry sample streamed during a live session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSample {
    /// When the registry accepted this sample
    pub received_at: DateTime<Utc>,

    /// Client payload, kept as-is (IMU readings, app state, gaze, ...)
    pub payload: serde_json::Value,
}

/// A keyframe descriptor (slide change, whiteboard update, camera capture)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyframe {
    pub received_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Completed,
}

/// How a session reached its final state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Client sent an explicit session-end
    Ended,
    /// Connection dropped while the session was still active
    Disconnected,
}

/// Summary of a finished session, retrievable by recording id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub recording_id: Uuid,
    pub title: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_secs: f64,
    /// Samples retained at end time (post-eviction)
    pub sensor_sample_count: usize,
    /// Keyframes retained at end time (post-eviction)
    pub keyframe_count: usize,
    pub status: RecordStatus,
    pub end_reason: EndReason,
}

/// Reply to a successful session-start
#[derive(Debug, Clone, Serialize)]
pub struct SessionStarted {
    pub recording_id: Uuid,
    pub title: String,
    pub started_at: DateTime<Utc>,
}

/// Read-only copy of a live session
#[derive(Debug, Clone, Serialize)]
pub struct LiveSessionSnapshot {
    pub connection_id: String,
    pub recording_id: Uuid,
    pub title: String,
    pub started_at: DateTime<Utc>,
    pub sensor_samples: Vec<SensorSample>,
    pub keyframes: Vec<Keyframe>,
}
