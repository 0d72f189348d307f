//! WebSocket upgrade handling.
//!
//! # Responsibilities
//! - Enforce the upgrade precondition (`Upgrade: websocket`, exact match)
//! - Complete the handshake and hand the client a 101 response
//! - Observe the server-side socket: log every frame and the close event
//!
//! # Design Decisions
//! - The socket is a diagnostic channel: frames are logged, never parsed,
//!   never echoed
//! - Requests without a proper upgrade get 426 with a fixed body
//! - Session lifecycle is pending → open → closed, nothing in between; no
//!   per-connection state survives the session task

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::observability::metrics;

/// Fixed body returned when the upgrade precondition fails.
pub const UPGRADE_REQUIRED_BODY: &str = "Expected Upgrade: websocket";

/// Handler for the `/ws` route.
pub async fn websocket_handler(
    headers: HeaderMap,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    // Exact match, case-sensitive: anything else is not an upgrade we accept.
    let upgrade = headers
        .get(header::UPGRADE)
        .and_then(|value| value.to_str().ok());
    if upgrade != Some("websocket") {
        return (StatusCode::UPGRADE_REQUIRED, UPGRADE_REQUIRED_BODY).into_response();
    }

    match ws {
        Ok(upgrade) => upgrade.on_upgrade(session),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "WebSocket handshake rejected");
            (StatusCode::UPGRADE_REQUIRED, UPGRADE_REQUIRED_BODY).into_response()
        }
    }
}

/// Observe an accepted socket until the peer goes away.
async fn session(mut socket: WebSocket) {
    metrics::record_ws_session_open();
    tracing::info!("WebSocket session open");

    while let Some(frame) = socket.recv().await {
        match frame {
            Ok(Message::Close(frame)) => {
                let code = frame.as_ref().map(|f| f.code);
                tracing::info!(close_code = ?code, "WebSocket closed by peer");
                break;
            }
            Ok(message) => {
                metrics::record_ws_frame();
                log_frame(&message);
            }
            Err(error) => {
                tracing::debug!(error = %error, "WebSocket transport error");
                break;
            }
        }
    }

    metrics::record_ws_session_closed();
    tracing::info!("WebSocket session closed");
}

fn log_frame(message: &Message) {
    match message {
        Message::Text(text) => tracing::info!(len = text.len(), "WebSocket text frame"),
        Message::Binary(data) => tracing::info!(len = data.len(), "WebSocket binary frame"),
        Message::Ping(_) => tracing::trace!("WebSocket ping"),
        Message::Pong(_) => tracing::trace!("WebSocket pong"),
        // Close frames are handled by the session loop.
        Message::Close(_) => {}
    }
}
