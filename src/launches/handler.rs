//! Axum handler for `/launches`.

use std::time::Instant;

use axum::extract::{RawQuery, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};

use crate::http::server::AppState;
use crate::http::X_REQUEST_ID;
use crate::launches::error::LaunchError;
use crate::observability::metrics;

/// Accepts every method so non-GET requests get the JSON 405 body.
pub async fn launches_handler(
    State(state): State<AppState>,
    method: Method,
    headers: axum::http::HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    match state.proxy.handle(&method, query.as_deref()).await {
        Ok(ok) => {
            tracing::debug!(request_id = %request_id, endpoint = %ok.endpoint, "Launches served");
            metrics::record_request(200, "ok", start_time);
            ok.into_response()
        }
        Err(err) => {
            log_error(&request_id, &err);
            if err.is_rejection() {
                metrics::record_rejection(err.kind());
            }
            metrics::record_request(err.status().as_u16(), err.kind(), start_time);
            err.into_response()
        }
    }
}

fn log_error(request_id: &str, err: &LaunchError) {
    match err {
        LaunchError::Misconfigured => {
            tracing::error!(request_id = %request_id, "Launch API token is not configured");
        }
        LaunchError::RateLimited { rate_limit } => {
            tracing::warn!(
                request_id = %request_id,
                retry_after = %rate_limit.retry_after_or_default(),
                "Rate limited by launch API"
            );
        }
        LaunchError::Upstream { status, .. } => {
            tracing::error!(request_id = %request_id, status = %status, "Launch API error");
        }
        LaunchError::Transport(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Launch API unreachable");
        }
        LaunchError::Decode(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Launch API returned invalid JSON");
        }
        LaunchError::BodyTooLarge { limit } => {
            tracing::error!(request_id = %request_id, limit = %limit, "Launch API response exceeded size limit");
        }
        _ => {
            tracing::warn!(request_id = %request_id, reason = err.kind(), error = %err, "Rejected launches request");
        }
    }
}
