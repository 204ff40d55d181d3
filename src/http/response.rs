//! Response headers common to every route.
//!
//! # Responsibilities
//! - Allow any origin to read responses (the proxy is called from browsers)
//! - Expose the forwarded rate-limit headers to browser scripts
//!
//! # Design Decisions
//! - Applied as outer layers so timeouts and 404s carry them too
//! - Per-response headers (Cache-Control, rate limits) are set by the
//!   launches handler, not here

use axum::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
};
use tower_http::set_header::SetResponseHeaderLayer;

const EXPOSED_HEADERS: &str = "X-RateLimit-Remaining, X-RateLimit-Reset, Retry-After, X-Request-Id";

pub fn cors_origin_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))
}

pub fn cors_expose_headers_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(EXPOSED_HEADERS),
    )
}
