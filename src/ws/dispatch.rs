use super::messages::{
    ClientEnvelope, KeyframeAck, SampleAck, ServerEvent, SessionEndedData, SessionStartData,
    SessionStartedData,
};
use crate::session::{SessionError, SessionRegistry};
use tracing::{debug, warn};

/// Apply one text frame from `connection_id` to the registry and build the
/// reply. Every failure becomes an `error` event so the connection keeps
/// flowing.
pub async fn dispatch(registry: &SessionRegistry, connection_id: &str, text: &str) -> ServerEvent {
    let envelope: ClientEnvelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Malformed frame from {}: {}", connection_id, e);
            return ServerEvent::malformed(format!("Invalid event frame: {}", e));
        }
    };

    debug!("Event {} from {}", envelope.event, connection_id);

    match envelope.event.as_str() {
        "session_start" => {
            let data = if envelope.data.is_null() {
                SessionStartData::default()
            } else {
                match serde_json::from_value::<SessionStartData>(envelope.data) {
                    Ok(data) => data,
                    Err(e) => {
                        return ServerEvent::malformed(format!("Invalid session_start: {}", e))
                    }
                }
            };

            match registry.start_session(connection_id, data.meeting_title).await {
                Ok(started) => ServerEvent::SessionStarted(SessionStartedData {
                    session_id: connection_id.to_string(),
                    recording_id: started.recording_id,
                    title: started.title,
                    started_at: started.started_at,
                }),
                Err(e) => error_event(e),
            }
        }
        "sensor_data" => match registry.record_sample(connection_id, envelope.data).await {
            Ok(sample_count) => ServerEvent::SampleAck(SampleAck { sample_count }),
            Err(e) => error_event(e),
        },
        "keyframe" => match registry.record_keyframe(connection_id, envelope.data).await {
            Ok(keyframe_count) => ServerEvent::KeyframeAck(KeyframeAck { keyframe_count }),
            Err(e) => error_event(e),
        },
        "session_end" => match registry.end_session(connection_id).await {
            Ok(record) => ServerEvent::SessionEnded(SessionEndedData { record }),
            Err(e) => error_event(e),
        },
        "ping" => ServerEvent::Pong,
        other => ServerEvent::malformed(format!("Unknown event type: {}", other)),
    }
}

fn error_event(err: SessionError) -> ServerEvent {
    ServerEvent::Error(err.to_payload())
}
