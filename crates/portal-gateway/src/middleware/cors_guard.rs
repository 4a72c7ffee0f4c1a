use crate::error::GatewayError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Reject cross-origin requests from origins outside the allowlist with an
/// explicit 403 JSON body. The `CorsLayer` further down only controls
/// response headers.
pub async fn check_origin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let allowed = &state.config.cors_origins;
    if allowed.iter().any(|origin| origin == "*") {
        return next.run(request).await;
    }

    if let Some(origin) = request
        .headers()
        .get(axum::http::header::ORIGIN)
        .and_then(|value| value.to_str().ok())
    {
        if !allowed.iter().any(|candidate| candidate == origin) {
            tracing::warn!(origin = %origin, "Rejected disallowed origin");
            return GatewayError::CorsRejected.into_response();
        }
    }

    next.run(request).await
}
