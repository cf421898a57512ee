//! API route definitions
//!
//! - POST /predict - climate indicator estimate
//! - GET  /health  - liveness and uptime
//! - GET  /ws      - WebSocket echo channel

use axum::{routing::{get, post}, Router};

use super::handlers::{self, ApiState};
use super::ws;

/// Create all API routes.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .route("/ws", get(ws::ws_echo))
        .with_state(state)
}
