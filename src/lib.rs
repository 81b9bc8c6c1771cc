pub mod config;
pub mod http;
pub mod llm;
pub mod session;
pub mod ws;

pub use config::Config;
pub use http::{create_router, AppState};
pub use llm::{LlmClient, TextGenerator};
pub use session::{
    MeetingRecord, SessionError, SessionLimits, SessionRegistry, MAX_KEYFRAMES, MAX_SAMPLES,
};
