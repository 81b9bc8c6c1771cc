use super::handlers;
use super::state::AppState;
use crate::ws;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.upload_max_bytes);

    Router::new()
        // Health check
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Uploads
        .route(
            "/api/v1/upload/audio",
            post(handlers::upload_audio).layer(upload_limit.clone()),
        )
        .route(
            "/api/v1/upload/video",
            post(handlers::upload_video).layer(upload_limit),
        )
        // Analysis
        .route("/api/v1/analyze/attention", post(handlers::analyze_attention))
        .route("/api/v1/analyze/keyframes", post(handlers::extract_keyframes))
        // Meeting queries
        .route(
            "/api/v1/meetings/:meeting_id/summary",
            get(handlers::get_meeting_summary),
        )
        .route(
            "/api/v1/recordings/:recording_id",
            get(handlers::get_recording),
        )
        .route("/api/v1/sessions", get(handlers::list_sessions))
        .route("/api/v1/test-llm", post(handlers::test_llm))
        // Live telemetry
        .route("/ws", get(ws::ws_upgrade))
        // The mobile client is served from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
