//! HTTP API server for the mobile and web clients
//!
//! This module provides the REST API and the WebSocket upgrade:
//! - GET / and GET /health - Health checks
//! - POST /api/v1/upload/{audio,video} - File uploads
//! - POST /api/v1/analyze/{attention,keyframes} - Analysis
//! - GET /api/v1/meetings/:id/summary - Meeting summary
//! - GET /api/v1/recordings/:id - Finalized meeting record
//! - GET /api/v1/sessions - Live/finished session overview
//! - POST /api/v1/test-llm - LLM connectivity check
//! - GET /ws - Live session telemetry

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
