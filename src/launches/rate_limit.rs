//! Upstream rate-limit signals forwarded to the caller.

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};

pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Seconds suggested to the caller when a 429 arrives without `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Rate-limit headers captured from an upstream response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    pub remaining: Option<HeaderValue>,
    pub reset: Option<HeaderValue>,
    pub retry_after: Option<HeaderValue>,
}

impl RateLimitHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            remaining: headers.get(&X_RATELIMIT_REMAINING).cloned(),
            reset: headers.get(&X_RATELIMIT_RESET).cloned(),
            retry_after: headers.get(RETRY_AFTER).cloned(),
        }
    }

    /// `Retry-After` as sent upstream, or the default when missing or unreadable.
    pub fn retry_after_or_default(&self) -> String {
        self.retry_after
            .as_ref()
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_RETRY_AFTER_SECS.to_string())
    }

    /// Copy the captured headers onto an outbound response.
    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Some(v) = &self.remaining {
            headers.insert(X_RATELIMIT_REMAINING, v.clone());
        }
        if let Some(v) = &self.reset {
            headers.insert(X_RATELIMIT_RESET, v.clone());
        }
        if let Some(v) = &self.retry_after {
            headers.insert(RETRY_AFTER, v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_apply() {
        let mut upstream = HeaderMap::new();
        upstream.insert(X_RATELIMIT_REMAINING, HeaderValue::from_static("14"));
        upstream.insert(X_RATELIMIT_RESET, HeaderValue::from_static("1700000000"));
        upstream.insert("x-unrelated", HeaderValue::from_static("1"));

        let captured = RateLimitHeaders::from_headers(&upstream);
        let mut outbound = HeaderMap::new();
        captured.apply(&mut outbound);

        assert_eq!(outbound.len(), 2);
        assert_eq!(outbound[&X_RATELIMIT_REMAINING], "14");
        assert_eq!(outbound[&X_RATELIMIT_RESET], "1700000000");
        assert!(outbound.get(RETRY_AFTER).is_none());
    }

    #[test]
    fn test_retry_after_default() {
        assert_eq!(RateLimitHeaders::default().retry_after_or_default(), "60");

        let headers = RateLimitHeaders {
            retry_after: Some(HeaderValue::from_static("30")),
            ..Default::default()
        };
        assert_eq!(headers.retry_after_or_default(), "30");
    }
}
