//! The launches request pipeline.
//!
//! ```text
//! method check → token check → LaunchQuery::parse → build URL
//!     → LaunchApiClient::fetch → translate status → shape body
//! ```

use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::Value;

use crate::config::{ApiToken, PolicyConfig, ProxyConfig, ResponseShape};
use crate::launches::endpoint::LaunchEndpoint;
use crate::launches::error::LaunchError;
use crate::launches::projection::{self, LaunchPage};
use crate::launches::query::LaunchQuery;
use crate::launches::rate_limit::RateLimitHeaders;
use crate::launches::upstream::{BuildError, LaunchApiClient, UpstreamResponse};
use crate::observability::metrics;

/// Successful body, either reduced or exactly as received.
#[derive(Debug)]
pub enum LaunchBody {
    Projected(LaunchPage),
    Raw(Value),
}

/// A complete successful response.
#[derive(Debug)]
pub struct LaunchesResponse {
    pub endpoint: LaunchEndpoint,
    pub body: LaunchBody,
    pub rate_limit: RateLimitHeaders,
    cache_control: HeaderValue,
}

impl IntoResponse for LaunchesResponse {
    fn into_response(self) -> Response {
        let mut response = match self.body {
            LaunchBody::Projected(page) => (StatusCode::OK, Json(page)).into_response(),
            LaunchBody::Raw(value) => (StatusCode::OK, Json(value)).into_response(),
        };
        let headers = response.headers_mut();
        headers.insert(CACHE_CONTROL, self.cache_control);
        self.rate_limit.apply(headers);
        response
    }
}

/// Validates launches requests and forwards them to the launch API.
///
/// The upstream client only exists when an API token was configured; without
/// it every GET fails with [`LaunchError::Misconfigured`].
#[derive(Debug)]
pub struct LaunchProxy {
    policy: PolicyConfig,
    cache_control: HeaderValue,
    upstream: Option<LaunchApiClient>,
}

impl LaunchProxy {
    pub fn new(config: &ProxyConfig, token: Option<&ApiToken>) -> Result<Self, BuildError> {
        let directive = config.cache.header_value();
        let cache_control =
            HeaderValue::from_str(&directive).map_err(|_| BuildError::CacheControl(directive.clone()))?;

        let upstream = token
            .map(|token| LaunchApiClient::new(&config.upstream, token))
            .transpose()?;

        Ok(Self {
            policy: config.policy.clone(),
            cache_control,
            upstream,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.upstream.is_some()
    }

    pub async fn handle(&self, method: &Method, raw_query: Option<&str>) -> Result<LaunchesResponse, LaunchError> {
        if *method != Method::GET {
            return Err(LaunchError::MethodNotAllowed(method.clone()));
        }
        let upstream = self.upstream.as_ref().ok_or(LaunchError::Misconfigured)?;

        let query = LaunchQuery::parse(raw_query, &self.policy)?;
        let params = query.upstream_params(&self.policy, Utc::now());
        let url = upstream.build_url(query.endpoint, &params);

        tracing::info!(url = %url, endpoint = %query.endpoint, "Fetching from launch API");

        let response = upstream.fetch(url).await?;
        metrics::record_upstream(response.status.as_u16());

        self.translate(query.endpoint, response)
    }

    fn translate(&self, endpoint: LaunchEndpoint, response: UpstreamResponse) -> Result<LaunchesResponse, LaunchError> {
        let UpstreamResponse {
            status,
            rate_limit,
            body,
        } = response;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LaunchError::RateLimited { rate_limit });
        }
        if !status.is_success() {
            return Err(LaunchError::Upstream { status, rate_limit });
        }

        let body = match self.policy.response_shape {
            ResponseShape::Projected => {
                LaunchBody::Projected(projection::project(&body).map_err(LaunchError::Decode)?)
            }
            ResponseShape::Raw => LaunchBody::Raw(serde_json::from_slice(&body).map_err(LaunchError::Decode)?),
        };

        Ok(LaunchesResponse {
            endpoint,
            body,
            rate_limit,
            cache_control: self.cache_control.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::header::RETRY_AFTER;

    fn proxy(shape: ResponseShape) -> LaunchProxy {
        let mut config = ProxyConfig::default();
        config.policy.response_shape = shape;
        config.upstream.system_proxy = false;
        LaunchProxy::new(&config, ApiToken::new("secret").as_ref()).unwrap()
    }

    fn upstream(status: StatusCode, body: &'static str) -> UpstreamResponse {
        UpstreamResponse {
            status,
            rate_limit: RateLimitHeaders::default(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[tokio::test]
    async fn test_method_checked_before_configuration() {
        let proxy = LaunchProxy::new(&ProxyConfig::default(), None).unwrap();
        assert!(!proxy.is_configured());

        let err = proxy.handle(&Method::DELETE, Some("endpoint=launch/upcoming")).await.unwrap_err();
        assert!(matches!(err, LaunchError::MethodNotAllowed(_)));

        let err = proxy.handle(&Method::GET, Some("endpoint=nope")).await.unwrap_err();
        assert!(matches!(err, LaunchError::Misconfigured));
    }

    #[test]
    fn test_translate_rate_limited() {
        let mut response = upstream(StatusCode::TOO_MANY_REQUESTS, "slow down");
        response.rate_limit.retry_after = Some(HeaderValue::from_static("30"));

        let err = proxy(ResponseShape::Projected)
            .translate(LaunchEndpoint::Upcoming, response)
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[RETRY_AFTER], "30");
    }

    #[test]
    fn test_translate_upstream_error() {
        let err = proxy(ResponseShape::Projected)
            .translate(LaunchEndpoint::Upcoming, upstream(StatusCode::NOT_FOUND, "{}"))
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_translate_raw_keeps_payload() {
        let ok = proxy(ResponseShape::Raw)
            .translate(
                LaunchEndpoint::Previous,
                upstream(StatusCode::OK, r#"{"count":1,"next":null,"results":[{"id":"a","slug":"s"}]}"#),
            )
            .unwrap();
        match ok.body {
            LaunchBody::Raw(value) => {
                assert_eq!(value["next"], Value::Null);
                assert_eq!(value["results"][0]["slug"], "s");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_translate_success_sets_cache_control() {
        let ok = proxy(ResponseShape::Projected)
            .translate(LaunchEndpoint::Upcoming, upstream(StatusCode::OK, r#"{"count":0,"results":[]}"#))
            .unwrap();
        let response = ok.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], "s-maxage=300, stale-while-revalidate=60");
    }

    #[test]
    fn test_translate_invalid_json() {
        let err = proxy(ResponseShape::Projected)
            .translate(LaunchEndpoint::Upcoming, upstream(StatusCode::OK, "<html>"))
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
