//! Live session management
//!
//! This module provides the `SessionRegistry` that tracks:
//! - One live session per open connection (start → telemetry → end/disconnect)
//! - Bounded sensor-sample and keyframe buffers with oldest-first eviction
//! - Finalized meeting records keyed by recording id

mod buffer;
mod clock;
mod config;
mod error;
mod record;
mod registry;

pub use buffer::BoundedBuffer;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{SessionLimits, DEFAULT_TITLE, MAX_KEYFRAMES, MAX_SAMPLES};
pub use error::{ErrorPayload, SessionError, SessionResult};
pub use record::{
    EndReason, Keyframe, LiveSessionSnapshot, MeetingRecord, RecordStatus, SensorSample,
    SessionStarted,
};
pub use registry::SessionRegistry;
