//! Upstream launch API client.
//!
//! # Responsibilities
//! - Build the target URL from the base, endpoint and encoded parameters
//! - Attach the API token as the `Authorization` credential
//! - Issue the GET and capture status, rate-limit headers and body
//! - Refuse success bodies larger than `max_body_bytes`
//!
//! No retries happen here; rate-limit and error responses go back to the
//! caller, who decides when to try again.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use axum::http::StatusCode;
use url::Url;

use crate::config::{ApiToken, UpstreamConfig};
use crate::launches::endpoint::LaunchEndpoint;
use crate::launches::error::LaunchError;
use crate::launches::rate_limit::RateLimitHeaders;

/// Errors that prevent the launch proxy from being built.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid upstream base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("API token is not a valid header value")]
    Token,

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid Cache-Control directive '{0}'")]
    CacheControl(String),
}

/// The parts of an upstream response the proxy acts on.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub rate_limit: RateLimitHeaders,
    pub body: Bytes,
}

/// Authenticated client for the launch API.
#[derive(Clone)]
pub struct LaunchApiClient {
    http: reqwest::Client,
    base_url: Url,
    authorization: HeaderValue,
    max_body_bytes: usize,
}

impl std::fmt::Debug for LaunchApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl LaunchApiClient {
    pub fn new(config: &UpstreamConfig, token: &ApiToken) -> Result<Self, BuildError> {
        let base_url = Url::parse(&config.base_url)?;

        let mut authorization =
            HeaderValue::from_str(&token.authorization()).map_err(|_| BuildError::Token)?;
        authorization.set_sensitive(true);

        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("launch-proxy/", env!("CARGO_PKG_VERSION")));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            authorization,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// `<base>/<endpoint>/?<params>`; the token never appears in the URL.
    pub fn build_url(&self, endpoint: LaunchEndpoint, params: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        let path = format!(
            "{}/{}/",
            self.base_url.path().trim_end_matches('/'),
            endpoint.as_path()
        );
        url.set_path(&path);
        url.set_query(None);
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    /// Issue the upstream GET and read the body of a successful response.
    ///
    /// Non-2xx bodies are left unread.
    pub async fn fetch(&self, url: Url) -> Result<UpstreamResponse, LaunchError> {
        let mut response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(LaunchError::Transport)?;

        let status = response.status();
        let rate_limit = RateLimitHeaders::from_headers(response.headers());
        if !status.is_success() {
            return Ok(UpstreamResponse {
                status,
                rate_limit,
                body: Bytes::new(),
            });
        }

        let limit = self.max_body_bytes;
        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(LaunchError::BodyTooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(LaunchError::Transport)? {
            if body.len() + chunk.len() > limit {
                return Err(LaunchError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(UpstreamResponse {
            status,
            rate_limit,
            body: Bytes::from(body),
        })
    }
}
