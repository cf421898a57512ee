//! HTTP handlers

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

use super::envelope::{self, ApiError};
use crate::prediction::{self, ParameterSet};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    started_at: Instant,
}

impl ApiState {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new()
    }
}

/// POST /predict
///
/// The body is read as raw bytes so that a missing, empty or malformed
/// body (or a wrong `Content-Type`) falls back to the default parameters
/// instead of being rejected by the JSON extractor.
pub async fn predict(body: Bytes) -> Response {
    let params = match ParameterSet::from_body(&body) {
        Ok(params) => params,
        Err(e) => {
            warn!(error = %e, "Rejected prediction request");
            return ApiError::InvalidParameterType(e.to_string()).into_response();
        }
    };

    let result = prediction::compute(params);
    debug!(
        co2 = params.co2,
        deforestation = params.deforestation,
        renewable_adoption = params.renewable_adoption,
        temperature = result.temperature,
        sea_level_rise = result.sea_level_rise,
        biodiversity_loss = result.biodiversity_loss,
        "Prediction computed"
    );

    (StatusCode::OK, Json(result)).into_response()
}

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

/// GET /health
pub async fn health(State(state): State<ApiState>) -> Response {
    envelope::ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_secs(),
    })
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
