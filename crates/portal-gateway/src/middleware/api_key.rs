use crate::error::GatewayError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Shared-secret gate applied to every `/api/*` route.
///
/// The key is a static deployment secret, not a session credential; a
/// missing or mismatched `X-API-Key` header is rejected before the request
/// reaches the proxy.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if secure_compare(key, &state.config.api_key) => next.run(request).await,
        _ => {
            tracing::warn!(path = %request.uri().path(), "Missing or invalid API key");
            GatewayError::Unauthorized.into_response()
        }
    }
}
