//! API middleware layers.
//!
//! Rejections produced below the handlers (body limit, timeout, method
//! router, WebSocket upgrade checks) come back as plain-text or empty
//! bodies. [`envelope_rejections`] rewrites them into the JSON error envelope.

use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::envelope::ApiError;

/// Plain-text rejection bodies are short; anything longer is not echoed back.
const MAX_REJECTION_DETAIL_BYTES: usize = 1024;

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Axum middleware that wraps non-JSON error responses in the error envelope.
///
/// The `Allow` header of a 405 is carried over.
pub async fn envelope_rejections(request: axum::extract::Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let allow: Option<HeaderValue> = response.headers().get(header::ALLOW).cloned();

    let body = axum::body::to_bytes(response.into_body(), MAX_REJECTION_DETAIL_BYTES).await;
    let detail = match body {
        Ok(bytes) if !bytes.is_empty() => String::from_utf8_lossy(&bytes).trim().to_string(),
        _ => status.canonical_reason().unwrap_or("Request rejected").to_string(),
    };

    tracing::debug!(status = %status, detail = %detail, "Wrapping rejection in error envelope");

    let mut wrapped = ApiError::from_status(status, detail).into_response();
    if let Some(allow) = allow {
        wrapped.headers_mut().insert(header::ALLOW, allow);
    }
    wrapped
}
