//! Error taxonomy for the launches endpoint and its HTTP mapping.

use axum::http::header::{HeaderValue, ALLOW};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::launches::endpoint::LaunchEndpoint;
use crate::launches::rate_limit::RateLimitHeaders;

/// Every way a launches request can fail.
///
/// Client and configuration errors are detected before any upstream call.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("Server misconfiguration")]
    Misconfigured,

    #[error("Missing endpoint parameter")]
    MissingEndpoint { allowed: Vec<LaunchEndpoint> },

    #[error("Invalid endpoint")]
    InvalidEndpoint { allowed: Vec<LaunchEndpoint> },

    #[error("Invalid location__ids")]
    InvalidLocation {
        invalid: Vec<String>,
        allowed: Vec<String>,
    },

    #[error("Rate limited by launch API. Please try again in a moment.")]
    RateLimited { rate_limit: RateLimitHeaders },

    #[error("Launch API returned {}", .status.as_u16())]
    Upstream {
        status: StatusCode,
        rate_limit: RateLimitHeaders,
    },

    #[error("Failed to reach launch API")]
    Transport(#[source] reqwest::Error),

    #[error("Launch API returned an unreadable response")]
    Decode(#[source] serde_json::Error),

    #[error("Launch API response too large")]
    BodyTooLarge { limit: usize },
}

impl LaunchError {
    pub fn status(&self) -> StatusCode {
        match self {
            LaunchError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            LaunchError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            LaunchError::MissingEndpoint { .. }
            | LaunchError::InvalidEndpoint { .. }
            | LaunchError::InvalidLocation { .. } => StatusCode::BAD_REQUEST,
            LaunchError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            LaunchError::Upstream { status, .. } => *status,
            LaunchError::Transport(_) | LaunchError::Decode(_) | LaunchError::BodyTooLarge { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// True for requests refused before any upstream call.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LaunchError::MethodNotAllowed(_)
                | LaunchError::MissingEndpoint { .. }
                | LaunchError::InvalidEndpoint { .. }
                | LaunchError::InvalidLocation { .. }
        )
    }

    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LaunchError::MethodNotAllowed(_) => "method_not_allowed",
            LaunchError::Misconfigured => "misconfigured",
            LaunchError::MissingEndpoint { .. } => "missing_endpoint",
            LaunchError::InvalidEndpoint { .. } => "invalid_endpoint",
            LaunchError::InvalidLocation { .. } => "invalid_location",
            LaunchError::RateLimited { .. } => "upstream_rate_limited",
            LaunchError::Upstream { .. } => "upstream_error",
            LaunchError::Transport(_) => "transport",
            LaunchError::Decode(_) => "decode",
            LaunchError::BodyTooLarge { .. } => "body_too_large",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after: Option<String>,
    results: Vec<serde_json::Value>,
}

fn endpoint_names(endpoints: &[LaunchEndpoint]) -> Vec<String> {
    endpoints.iter().map(ToString::to_string).collect()
}

impl IntoResponse for LaunchError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorBody {
            error: self.to_string(),
            allowed: None,
            invalid: None,
            retry_after: None,
            results: Vec::new(),
        };

        let mut forwarded = None;
        let mut allow_get = false;
        match self {
            LaunchError::MethodNotAllowed(_) => allow_get = true,
            LaunchError::MissingEndpoint { allowed } | LaunchError::InvalidEndpoint { allowed } => {
                body.allowed = Some(endpoint_names(&allowed));
            }
            LaunchError::InvalidLocation { invalid, allowed } => {
                body.invalid = Some(invalid);
                body.allowed = Some(allowed);
            }
            LaunchError::RateLimited { mut rate_limit } => {
                let retry_after = rate_limit.retry_after_or_default();
                rate_limit.retry_after = HeaderValue::from_str(&retry_after).ok();
                body.retry_after = Some(retry_after);
                forwarded = Some(rate_limit);
            }
            LaunchError::Upstream { rate_limit, .. } => forwarded = Some(rate_limit),
            LaunchError::Misconfigured
            | LaunchError::Transport(_)
            | LaunchError::Decode(_)
            | LaunchError::BodyTooLarge { .. } => {}
        }

        let mut response = (status, Json(body)).into_response();
        if allow_get {
            response.headers_mut().insert(ALLOW, HeaderValue::from_static("GET"));
        }
        if let Some(rate_limit) = forwarded {
            rate_limit.apply(response.headers_mut());
        }
        response
    }
}
