//! JSON envelope for everything except a successful prediction.
//!
//! `POST /predict` answers with the bare three-field result. Health data is
//! wrapped as `{ "data": ..., "meta": ... }` and every error the service
//! emits, whether raised by a handler or by a middleware rejection, as
//! `{ "error": { "status", "code", "message" }, "meta": ... }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

/// Stamped on every envelope.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

impl ResponseMeta {
    fn now() -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DataBody<T: Serialize> {
    data: T,
    meta: ResponseMeta,
}

/// 200 with `data` wrapped in the envelope.
pub fn ok<T: Serialize>(data: T) -> Response {
    let body = DataBody {
        data,
        meta: ResponseMeta::now(),
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

/// Every error response the service can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A recognized prediction parameter carried a non-numeric value.
    InvalidParameterType(String),
    NotFound(String),
    MethodNotAllowed,
    PayloadTooLarge,
    RequestTimeout,
    /// Any other rejection produced below the handlers.
    Rejected(StatusCode, String),
}

impl ApiError {
    /// Classify a bare error status coming out of the middleware stack.
    pub fn from_status(status: StatusCode, detail: String) -> Self {
        match status {
            StatusCode::METHOD_NOT_ALLOWED => Self::MethodNotAllowed,
            StatusCode::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge,
            StatusCode::REQUEST_TIMEOUT => Self::RequestTimeout,
            StatusCode::NOT_FOUND => Self::NotFound(detail),
            other => Self::Rejected(other, detail),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameterType(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::Rejected(status, _) => *status,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameterType(_) => "INVALID_PARAMETER_TYPE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::RequestTimeout => "REQUEST_TIMEOUT",
            Self::Rejected(status, _) if status.is_server_error() => "INTERNAL_ERROR",
            Self::Rejected(..) => "BAD_REQUEST",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidParameterType(msg) | Self::NotFound(msg) | Self::Rejected(_, msg) => {
                msg.clone()
            }
            Self::MethodNotAllowed => "Method not allowed for this route".to_string(),
            Self::PayloadTooLarge => "Request body exceeds server.max_body_bytes".to_string(),
            Self::RequestTimeout => "Request exceeded server.request_timeout_secs".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    status: u16,
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
    meta: ResponseMeta,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: ErrorDetail {
                status: status.as_u16(),
                code: self.code(),
                message: self.message(),
            },
            meta: ResponseMeta::now(),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ok_response_shape() {
        let resp = ok(serde_json::json!({"hello": "world"}));
        assert_eq!(resp.status(), StatusCode::OK);

        let v = body_json(resp).await;
        assert_eq!(v["data"]["hello"], "world");
        assert_eq!(v["meta"]["service"], "verdant");
        assert_eq!(v["meta"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(v["meta"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_parameter_type_shape() {
        let msg = "Parameter 'co2' must be a number, got string";
        let resp = ApiError::InvalidParameterType(msg.to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let v = body_json(resp).await;
        assert_eq!(v["error"]["status"], 400);
        assert_eq!(v["error"]["code"], "INVALID_PARAMETER_TYPE");
        assert_eq!(v["error"]["message"], msg);
    }

    #[test]
    fn test_from_status_classification() {
        let cases = [
            (StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
            (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            (StatusCode::REQUEST_TIMEOUT, "REQUEST_TIMEOUT"),
            (StatusCode::NOT_FOUND, "NOT_FOUND"),
            (StatusCode::UPGRADE_REQUIRED, "BAD_REQUEST"),
            (StatusCode::SERVICE_UNAVAILABLE, "INTERNAL_ERROR"),
        ];
        for (status, code) in cases {
            let err = ApiError::from_status(status, String::new());
            assert_eq!(err.status(), status);
            assert_eq!(err.code(), code, "status {status}");
        }
    }
}
