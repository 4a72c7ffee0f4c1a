//! `/api/*` forwarding to the backend.
//!
//! The gateway validates the caller's shared secret (middleware), then
//! re-issues the request against the backend with the configured key,
//! preserving method, path, query, content type, and body. Responses pass
//! through unchanged, including backend error bodies.

use crate::error::GatewayError;
use crate::state::AppState;
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::header::CONTENT_TYPE,
    response::Response,
};
use std::sync::Arc;

pub async fn proxy_api(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, GatewayError> {
    let path_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let url = format!("{}{}", state.config.backend_url, path_query);

    let method = request.method().clone();
    let content_type = request.headers().get(CONTENT_TYPE).cloned();
    // The request-body limit layer has already bounded this.
    let body = to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|err| GatewayError::Upstream(err.to_string()))?;

    tracing::debug!(method = %method, url = %url, "Forwarding API request");

    let mut upstream = state
        .http
        .request(method, url.as_str())
        .header("X-API-Key", state.config.api_key.as_str())
        .body(body);
    if let Some(content_type) = content_type {
        upstream = upstream.header(CONTENT_TYPE, content_type);
    }

    let upstream_response = upstream
        .send()
        .await
        .map_err(|err| GatewayError::Upstream(err.to_string()))?;

    let status = upstream_response.status();
    let response_content_type = upstream_response.headers().get(CONTENT_TYPE).cloned();
    let bytes = upstream_response
        .bytes()
        .await
        .map_err(|err| GatewayError::Upstream(err.to_string()))?;

    let mut builder = Response::builder().status(status);
    if let Some(content_type) = response_content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder
        .body(Body::from(bytes))
        .map_err(|err| GatewayError::Upstream(err.to_string()))
}
