//! REST API module using Axum
//!
//! Routes live in [`routes`], handlers in [`handlers`] and [`ws`].
//! [`create_app`] adds the middleware stack: request tracing, CORS, body size
//! limit, timeout, and the error envelope for rejections from those layers.

pub mod envelope;
pub mod handlers;
pub mod middleware;
mod routes;
pub mod ws;

pub use handlers::ApiState;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware as axum_mw;
use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// `server.cors_origins` (or `VERDANT_CORS_ORIGINS`) lists origins allowed to
/// call the API, e.g. `http://localhost:5173` for a dashboard dev server.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return cors;
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    tracing::info!(origins = %origins.join(","), "CORS: allowing configured origins");
    cors.allow_origin(allowed)
}

/// Create the complete application router.
pub fn create_app(state: ApiState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::api_routes(state))
        .fallback(handlers::not_found)
        // Middleware
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(axum_mw::from_fn(middleware::envelope_rejections))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&server.cors_origins))
}
