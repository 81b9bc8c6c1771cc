use super::dispatch::dispatch;
use super::messages::{ConnectedData, ServerEvent};
use crate::http::AppState;
use crate::session::SessionRegistry;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::stream::StreamExt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// GET /ws
/// Upgrade to the live telemetry channel
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let registry = Arc::clone(&state.registry);
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

async fn handle_socket(mut socket: WebSocket, registry: Arc<SessionRegistry>) {
    let connection_id = format!("conn-{}", uuid::Uuid::new_v4());
    info!("WebSocket connected: {}", connection_id);

    let hello = ServerEvent::Connected(ConnectedData {
        session_id: connection_id.clone(),
    });

    if send_event(&mut socket, &hello).await {
        while let Some(msg) = socket.next().await {
            let reply = match msg {
                Ok(Message::Text(text)) => dispatch(&registry, &connection_id, &text).await,
                Ok(Message::Binary(_)) => ServerEvent::malformed("Binary frames are not supported"),
                // Pings are answered by axum itself
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    warn!("WebSocket error on {}: {}", connection_id, e);
                    break;
                }
            };

            if !send_event(&mut socket, &reply).await {
                break;
            }
        }
    }

    if let Some(record) = registry.on_disconnect(&connection_id).await {
        info!(
            "Finalized recording {} after disconnect of {}",
            record.recording_id, connection_id
        );
    }

    info!("WebSocket closed: {}", connection_id);
}

/// Returns false once the socket can no longer be written to
async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> bool {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to encode event: {}", e);
            return true;
        }
    };

    match socket.send(Message::Text(text)).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to send event: {}", e);
            false
        }
    }
}
