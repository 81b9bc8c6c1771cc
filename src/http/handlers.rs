use super::state::AppState;
use crate::session::{MeetingRecord, SessionError};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

const DEFAULT_LLM_PROMPT: &str = "Hello, introduce yourself in one sentence.";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: String,
    pub filename: Option<String>,
    pub size: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AttentionPeriod {
    pub start: u32,
    pub end: u32,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct AttentionResponse {
    pub status: String,
    pub attention_score: f32,
    pub low_attention_periods: Vec<AttentionPeriod>,
}

#[derive(Debug, Deserialize)]
pub struct KeyframesQuery {
    pub video_id: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractedKeyframe {
    pub timestamp: f64,
    pub frame_id: String,
    pub change_type: String,
}

#[derive(Debug, Serialize)]
pub struct KeyframesResponse {
    pub status: String,
    pub video_id: String,
    pub keyframes: Vec<ExtractedKeyframe>,
}

#[derive(Debug, Serialize)]
pub struct ActionItem {
    pub task: String,
    pub assignee: String,
    pub due_date: String,
    pub timestamp: u32,
}

#[derive(Debug, Serialize)]
pub struct MeetingSummary {
    pub title: String,
    pub executive_summary: String,
    pub key_points: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub meeting_id: String,
    /// "llm" or "placeholder"
    pub source: String,
    pub record: Option<MeetingRecord>,
    pub summary: MeetingSummary,
}

#[derive(Debug, Serialize)]
pub struct SessionsOverview {
    pub active_sessions: usize,
    pub completed_recordings: Vec<MeetingRecord>,
}

#[derive(Debug, Deserialize)]
pub struct TestLlmRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TestLlmResponse {
    pub status: String,
    pub model: String,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

fn session_error_response(err: SessionError) -> Response {
    let status = match err {
        SessionError::InvalidState { .. } => StatusCode::CONFLICT,
        SessionError::UnknownSession { .. } | SessionError::NotFound { .. } => {
            StatusCode::NOT_FOUND
        }
    };
    error_response(status, err.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Service status
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ServiceStatus {
        status: "healthy".to_string(),
        service: state.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// POST /api/v1/upload/audio
/// Accept an audio file for transcription and analysis
pub async fn upload_audio(multipart: Multipart) -> Response {
    receive_upload(multipart, "audio").await
}

/// POST /api/v1/upload/video
/// Accept a video file for frame extraction and analysis
pub async fn upload_video(multipart: Multipart) -> Response {
    receive_upload(multipart, "video").await
}

/// Read the `file` field and check its content type against `kind/*`
async fn receive_upload(mut multipart: Multipart, kind: &str) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed {} upload: {}", kind, e);
                return error_response(StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e));
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();

        if !content_type.starts_with(&format!("{}/", kind)) {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid file type. Must be {}.", kind),
            );
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to read {} upload: {}", kind, e);
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read upload: {}", e),
                );
            }
        };

        info!(
            "Received {} file: {:?} ({} bytes)",
            kind,
            filename,
            bytes.len()
        );

        return (
            StatusCode::OK,
            Json(UploadResponse {
                status: "success".to_string(),
                filename,
                size: bytes.len(),
                message: format!(
                    "{} file received and queued for processing",
                    capitalize(kind)
                ),
            }),
        )
            .into_response();
    }

    error_response(StatusCode::BAD_REQUEST, "Missing 'file' field")
}

/// POST /api/v1/analyze/attention
/// Attention analysis over IMU, app-state and gaze data (placeholder result)
pub async fn analyze_attention(Json(data): Json<serde_json::Value>) -> impl IntoResponse {
    let inputs: Vec<&str> = ["imu_data", "app_state", "gaze_data"]
        .into_iter()
        .filter(|key| data.get(*key).is_some())
        .collect();
    info!("Analyzing attention patterns (inputs: {:?})", inputs);

    Json(AttentionResponse {
        status: "success".to_string(),
        attention_score: 0.85,
        low_attention_periods: vec![
            AttentionPeriod {
                start: 300,
                end: 450,
                reason: "device_switched".to_string(),
            },
            AttentionPeriod {
                start: 1200,
                end: 1380,
                reason: "phone_movement".to_string(),
            },
        ],
    })
}

/// POST /api/v1/analyze/keyframes?video_id=...
/// Keyframe extraction for slide and whiteboard changes (placeholder result)
pub async fn extract_keyframes(Query(query): Query<KeyframesQuery>) -> impl IntoResponse {
    info!("Extracting keyframes for video: {}", query.video_id);

    let keyframes = [(5.3, "frame_001"), (12.7, "frame_002"), (25.1, "frame_003")]
        .into_iter()
        .map(|(timestamp, frame_id)| ExtractedKeyframe {
            timestamp,
            frame_id: frame_id.to_string(),
            change_type: "slide_change".to_string(),
        })
        .collect();

    Json(KeyframesResponse {
        status: "success".to_string(),
        video_id: query.video_id,
        keyframes,
    })
}

/// GET /api/v1/meetings/:meeting_id/summary
/// Meeting summary, LLM-generated when a model is configured
pub async fn get_meeting_summary(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> impl IntoResponse {
    info!("Generating summary for meeting: {}", meeting_id);

    let record = match Uuid::parse_str(&meeting_id) {
        Ok(id) => state.registry.get_record(id).await.ok(),
        Err(_) => None,
    };

    let mut summary = placeholder_summary(record.as_ref());
    let mut source = "placeholder";

    if let Some(llm) = &state.llm {
        let prompt = summary_prompt(&summary.title, record.as_ref());
        match llm.generate(&prompt).await {
            Ok(text) => {
                summary.executive_summary = text;
                source = "llm";
            }
            Err(e) => {
                warn!(
                    "LLM summary failed for {} (model={}): {:#}",
                    meeting_id,
                    llm.model(),
                    e
                );
            }
        }
    }

    Json(SummaryResponse {
        meeting_id,
        source: source.to_string(),
        record,
        summary,
    })
}

/// GET /api/v1/recordings/:recording_id
/// Finalized meeting record
pub async fn get_recording(
    State(state): State<AppState>,
    Path(recording_id): Path<String>,
) -> Response {
    let recording_id = match Uuid::parse_str(&recording_id) {
        Ok(id) => id,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid recording id: {}", recording_id),
            )
        }
    };

    match state.registry.get_record(recording_id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => session_error_response(e),
    }
}

/// GET /api/v1/sessions
/// Live session count and finalized records
pub async fn list_sessions(State(state): State<AppState>) -> impl IntoResponse {
    Json(SessionsOverview {
        active_sessions: state.registry.active_count().await,
        completed_recordings: state.registry.records().await,
    })
}

/// POST /api/v1/test-llm
/// Round-trip a prompt through the configured LLM
pub async fn test_llm(
    State(state): State<AppState>,
    Json(req): Json<TestLlmRequest>,
) -> Response {
    let Some(llm) = &state.llm else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "No LLM configured");
    };

    let prompt = req
        .prompt
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LLM_PROMPT.to_string());

    match llm.generate(&prompt).await {
        Ok(response) => (
            StatusCode::OK,
            Json(TestLlmResponse {
                status: "success".to_string(),
                model: llm.model().to_string(),
                response,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("LLM test failed: {:#}", e);
            error_response(StatusCode::BAD_GATEWAY, format!("LLM request failed: {:#}", e))
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn placeholder_summary(record: Option<&MeetingRecord>) -> MeetingSummary {
    MeetingSummary {
        title: record
            .map(|r| r.title.clone())
            .unwrap_or_else(|| "Product Strategy Meeting".to_string()),
        executive_summary: "Team reviewed Q4 roadmap and finalized marketing strategy"
            .to_string(),
        key_points: vec![
            "Q4 feature prioritization completed".to_string(),
            "Budget allocation approved".to_string(),
            "Marketing timeline adjusted".to_string(),
        ],
        action_items: vec![ActionItem {
            task: "Finalize feature specifications".to_string(),
            assignee: "Product team".to_string(),
            due_date: "2026-02-05".to_string(),
            timestamp: 754,
        }],
    }
}

fn summary_prompt(title: &str, record: Option<&MeetingRecord>) -> String {
    let mut prompt = format!(
        "Write a two-sentence executive summary for the meeting \"{}\".",
        title
    );

    if let Some(r) = record {
        prompt.push_str(&format!(
            "\nThe meeting started at {} and lasted {:.0} seconds. \
             {} sensor samples and {} keyframes (slide or whiteboard changes) were captured.",
            r.started_at.to_rfc3339(),
            r.duration_secs,
            r.sensor_sample_count,
            r.keyframe_count
        ));
    }

    prompt
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
