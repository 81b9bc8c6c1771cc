use serde::Serialize;
use uuid::Uuid;

/// Result type for registry operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Recoverable failures reported by the session registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("connection {connection_id} already has an active session")]
    InvalidState { connection_id: String },

    #[error("no active session for connection {connection_id}")]
    UnknownSession { connection_id: String },

    #[error("recording {recording_id} not found")]
    NotFound { recording_id: Uuid },
}

impl SessionError {
    /// Stable identifier sent to clients alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::InvalidState { .. } => "invalid_state",
            SessionError::UnknownSession { .. } => "unknown_session",
            SessionError::NotFound { .. } => "not_found",
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// Structured error forwarded to the transport layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub kind: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = SessionError::UnknownSession {
            connection_id: "conn-9".to_string(),
        };
        let payload = err.to_payload();
        assert_eq!(payload.kind, "unknown_session");
        assert_eq!(payload.message, "no active session for connection conn-9");

        let err = SessionError::InvalidState {
            connection_id: "conn-1".to_string(),
        };
        assert_eq!(err.kind(), "invalid_state");

        let err = SessionError::NotFound {
            recording_id: Uuid::nil(),
        };
        assert_eq!(err.kind(), "not_found");
        assert!(err.to_string().contains("00000000-0000-0000-0000-000000000000"));
    }
}
