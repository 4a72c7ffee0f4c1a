//! HTTP error response conversion
//!
//! Gateway failures render as small JSON bodies with stable `error` /
//! `message` fields; the frontend matches on them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid API key")]
    Unauthorized,

    #[error("origin not allowed")]
    CorsRejected,

    #[error("resource not found")]
    NotFound,

    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl GatewayError {
    fn status(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::CorsRejected => StatusCode::FORBIDDEN,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            GatewayError::Unauthorized => ErrorResponse {
                error: "Invalid API Key".to_string(),
                message: "Please provide a valid API key".to_string(),
            },
            GatewayError::CorsRejected => ErrorResponse {
                error: "CORS Error".to_string(),
                message: "Origin not allowed".to_string(),
            },
            GatewayError::NotFound => ErrorResponse {
                error: "Not Found".to_string(),
                message: "The requested resource could not be found".to_string(),
            },
            GatewayError::Upstream(detail) => ErrorResponse {
                error: "Bad Gateway".to_string(),
                message: detail.clone(),
            },
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            GatewayError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Upstream request failed");
            }
            other => {
                tracing::warn!(error = %other, "Request rejected");
            }
        }
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_renders_the_expected_body() {
        let body = GatewayError::Unauthorized.body();
        assert_eq!(body.error, "Invalid API Key");
        assert_eq!(body.message, "Please provide a valid API key");
        assert_eq!(GatewayError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn cors_rejection_is_forbidden() {
        assert_eq!(GatewayError::CorsRejected.status(), StatusCode::FORBIDDEN);
        assert_eq!(GatewayError::CorsRejected.body().error, "CORS Error");
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let err = GatewayError::Upstream("connection refused".to_string());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.body().message, "connection refused");
    }
}
