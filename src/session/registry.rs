use super::buffer::BoundedBuffer;
use super::clock::{Clock, SystemClock};
use super::config::SessionLimits;
use super::error::{SessionError, SessionResult};
use super::record::{
    EndReason, Keyframe, LiveSessionSnapshot, MeetingRecord, RecordStatus, SensorSample,
    SessionStarted,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// State of one open connection's session
struct LiveSession {
    recording_id: Uuid,
    title: String,
    started_at: DateTime<Utc>,
    sensor_samples: BoundedBuffer<SensorSample>,
    keyframes: BoundedBuffer<Keyframe>,
}

impl LiveSession {
    fn finalize(self, ended_at: DateTime<Utc>, end_reason: EndReason) -> MeetingRecord {
        let duration = ended_at.signed_duration_since(self.started_at);

        MeetingRecord {
            recording_id: self.recording_id,
            title: self.title,
            started_at: self.started_at,
            ended_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            sensor_sample_count: self.sensor_samples.len(),
            keyframe_count: self.keyframes.len(),
            status: RecordStatus::Completed,
            end_reason,
        }
    }

    fn snapshot(&self, connection_id: &str) -> LiveSessionSnapshot {
        LiveSessionSnapshot {
            connection_id: connection_id.to_string(),
            recording_id: self.recording_id,
            title: self.title.clone(),
            started_at: self.started_at,
            sensor_samples: self.sensor_samples.to_vec(),
            keyframes: self.keyframes.to_vec(),
        }
    }
}

#[derive(Default)]
struct RegistryState {
    /// Live sessions (connection_id → session)
    live: HashMap<String, LiveSession>,

    /// Finalized records (recording_id → record)
    records: HashMap<Uuid, MeetingRecord>,
}

/// Owns every live session and every finalized meeting record.
///
/// Both maps sit behind one lock, so a reader never sees a session halfway
/// through an insert or halfway between "live" and "recorded".
pub struct SessionRegistry {
    limits: SessionLimits,
    clock: Arc<dyn Clock>,
    state: RwLock<RegistryState>,
}

impl SessionRegistry {
    pub fn new(limits: SessionLimits) -> Self {
        Self::with_clock(limits, Arc::new(SystemClock))
    }

    pub fn with_clock(limits: SessionLimits, clock: Arc<dyn Clock>) -> Self {
        Self {
            limits,
            clock,
            state: RwLock::new(RegistryState::default()),
        }
    }

    pub fn limits(&self) -> &SessionLimits {
        &self.limits
    }

    /// Begin a session on a connection that has none
    pub async fn start_session(
        &self,
        connection_id: &str,
        title: Option<String>,
    ) -> SessionResult<SessionStarted> {
        let mut state = self.state.write().await;

        if state.live.contains_key(connection_id) {
            warn!("Duplicate session start on connection {}", connection_id);
            return Err(SessionError::InvalidState {
                connection_id: connection_id.to_string(),
            });
        }

        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.limits.default_title.clone());

        let session = LiveSession {
            recording_id: Uuid::new_v4(),
            title,
            started_at: self.clock.now(),
            sensor_samples: BoundedBuffer::new(self.limits.max_samples),
            keyframes: BoundedBuffer::new(self.limits.max_keyframes),
        };

        let started = SessionStarted {
            recording_id: session.recording_id,
            title: session.title.clone(),
            started_at: session.started_at,
        };

        state.live.insert(connection_id.to_string(), session);

        info!(
            "Session started: connection={} recording={} title={:?}",
            connection_id, started.recording_id, started.title
        );

        Ok(started)
    }

    /// Append a sensor sample, returning the number of samples now retained
    pub async fn record_sample(
        &self,
        connection_id: &str,
        payload: serde_json::Value,
    ) -> SessionResult<usize> {
        let received_at = self.clock.now();
        let mut state = self.state.write().await;
        let session = state
            .live
            .get_mut(connection_id)
            .ok_or_else(|| unknown(connection_id))?;

        if session
            .sensor_samples
            .push(SensorSample {
                received_at,
                payload,
            })
            .is_some()
        {
            debug!("Sensor buffer full for {}, evicted oldest", connection_id);
        }

        Ok(session.sensor_samples.len())
    }

    /// Append a keyframe, returning the number of keyframes now retained
    pub async fn record_keyframe(
        &self,
        connection_id: &str,
        payload: serde_json::Value,
    ) -> SessionResult<usize> {
        let received_at = self.clock.now();
        let mut state = self.state.write().await;
        let session = state
            .live
            .get_mut(connection_id)
            .ok_or_else(|| unknown(connection_id))?;

        if session
            .keyframes
            .push(Keyframe {
                received_at,
                payload,
            })
            .is_some()
        {
            debug!("Keyframe buffer full for {}, evicted oldest", connection_id);
        }

        Ok(session.keyframes.len())
    }

    /// Close the session explicitly and store its record
    pub async fn end_session(&self, connection_id: &str) -> SessionResult<MeetingRecord> {
        self.finalize(connection_id, EndReason::Ended)
            .await
            .ok_or_else(|| unknown(connection_id))
    }

    /// Finalize whatever the connection left open. Never fails; a connection
    /// without a live session (or one already finalized) is a no-op.
    pub async fn on_disconnect(&self, connection_id: &str) -> Option<MeetingRecord> {
        let record = self.finalize(connection_id, EndReason::Disconnected).await;
        if record.is_none() {
            debug!("Disconnect for {} with no active session", connection_id);
        }
        record
    }

    pub async fn get_record(&self, recording_id: Uuid) -> SessionResult<MeetingRecord> {
        let state = self.state.read().await;
        state
            .records
            .get(&recording_id)
            .cloned()
            .ok_or(SessionError::NotFound { recording_id })
    }

    /// Copy of a live session, including the retained telemetry
    pub async fn live_session(&self, connection_id: &str) -> SessionResult<LiveSessionSnapshot> {
        let state = self.state.read().await;
        state
            .live
            .get(connection_id)
            .map(|s| s.snapshot(connection_id))
            .ok_or_else(|| unknown(connection_id))
    }

    pub async fn active_count(&self) -> usize {
        self.state.read().await.live.len()
    }

    /// All finalized records, most recently ended first
    pub async fn records(&self) -> Vec<MeetingRecord> {
        let state = self.state.read().await;
        let mut records: Vec<MeetingRecord> = state.records.values().cloned().collect();
        records.sort_by(|a, b| b.ended_at.cmp(&a.ended_at));
        records
    }

    /// Finalize every live session as disconnected. Used at shutdown, after
    /// the transport has stopped accepting connections.
    pub async fn finalize_all(&self) -> Vec<MeetingRecord> {
        let ended_at = self.clock.now();
        let mut state = self.state.write().await;
        let live: Vec<(String, LiveSession)> = state.live.drain().collect();

        live.into_iter()
            .map(|(connection_id, session)| {
                state.store(&connection_id, session, ended_at, EndReason::Disconnected)
            })
            .collect()
    }

    async fn finalize(&self, connection_id: &str, reason: EndReason) -> Option<MeetingRecord> {
        let ended_at = self.clock.now();
        let mut state = self.state.write().await;
        let session = state.live.remove(connection_id)?;
        Some(state.store(connection_id, session, ended_at, reason))
    }
}

impl RegistryState {
    fn store(
        &mut self,
        connection_id: &str,
        session: LiveSession,
        ended_at: DateTime<Utc>,
        reason: EndReason,
    ) -> MeetingRecord {
        let record = session.finalize(ended_at, reason);
        self.records.insert(record.recording_id, record.clone());

        info!(
            "Session closed ({:?}): connection={} recording={} samples={} keyframes={}",
            reason,
            connection_id,
            record.recording_id,
            record.sensor_sample_count,
            record.keyframe_count
        );

        record
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionLimits::default())
    }
}

fn unknown(connection_id: &str) -> SessionError {
    SessionError::UnknownSession {
        connection_id: connection_id.to_string(),
    }
}
