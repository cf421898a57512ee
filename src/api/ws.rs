//! WebSocket echo channel at `GET /ws`.
//!
//! Every text or binary message is answered with a text frame
//! `"Echo: <message>"`. Binary payloads are decoded lossily as UTF-8.
//! Ping/pong is handled by the protocol layer.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tracing::{debug, info};

/// Prefix prepended to every echoed message.
pub const ECHO_PREFIX: &str = "Echo: ";

/// GET /ws
pub async fn ws_echo(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(echo_session)
}

/// Reply for one inbound message, or `None` when the message needs no answer.
pub fn echo_reply(message: &Message) -> Option<Message> {
    match message {
        Message::Text(text) => Some(Message::Text(format!("{ECHO_PREFIX}{text}"))),
        Message::Binary(bytes) => Some(Message::Text(format!(
            "{ECHO_PREFIX}{}",
            String::from_utf8_lossy(bytes)
        ))),
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) => None,
    }
}

async fn echo_session(mut socket: WebSocket) {
    info!("WebSocket client connected");
    let mut echoed: u64 = 0;

    while let Some(incoming) = socket.recv().await {
        let message = match incoming {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, "WebSocket receive failed");
                break;
            }
        };
        if matches!(message, Message::Close(_)) {
            break;
        }
        if let Some(reply) = echo_reply(&message) {
            if socket.send(reply).await.is_err() {
                break;
            }
            echoed += 1;
        }
    }

    info!(messages = echoed, "WebSocket client disconnected");
}
