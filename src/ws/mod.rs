//! WebSocket channel for live session telemetry
//!
//! Each socket gets its own connection id. Client frames are JSON envelopes:
//! - `session_start` - Begin a session (optional `meetingTitle`)
//! - `sensor_data` - Append a sensor sample
//! - `keyframe` - Append a keyframe
//! - `session_end` - Finalize the session into a meeting record
//! - `ping` - Liveness check
//!
//! Closing the socket finalizes any session still open.

mod dispatch;
mod handler;
pub mod messages;

pub use dispatch::dispatch;
pub use handler::ws_upgrade;
pub use messages::{ClientEnvelope, ServerEvent};
