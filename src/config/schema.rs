//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::launches::endpoint::LaunchEndpoint;

/// Root configuration for the launch proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream launch API settings.
    pub upstream: UpstreamConfig,

    /// Query and response policy for the launches endpoint.
    pub policy: PolicyConfig,

    /// Edge cache directives attached to successful responses.
    pub cache: CacheConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream launch API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL including the API version segment.
    pub base_url: String,

    /// Name of the environment variable holding the API token.
    pub token_env: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total upstream request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Honour HTTP(S)_PROXY from the environment for upstream calls.
    pub system_proxy: bool,

    /// Largest upstream response body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ll.thespacedevs.com/2.2.0".to_string(),
            token_env: "LAUNCH_API_TOKEN".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
            system_proxy: true,
            max_body_bytes: 8 * 1024 * 1024, // 8MB
        }
    }
}

/// How successful upstream payloads are returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// Reduce each launch to the fields the frontend renders.
    #[default]
    Projected,
    /// Forward the upstream JSON unchanged.
    Raw,
}

/// Request validation and defaulting policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Endpoints callers may request.
    pub allowed_endpoints: Vec<LaunchEndpoint>,

    /// Facility ids accepted in `location__ids`.
    pub allowed_location_ids: Vec<String>,

    /// Filter applied when the caller sends no `location__ids`.
    pub default_location_ids: Vec<String>,

    /// Page size applied when the caller sends no `limit`.
    pub default_limit: Option<u32>,

    /// Length of the default `net` window for upcoming launches (0 disables).
    pub default_window_days: u32,

    /// Shape of successful response bodies.
    pub response_shape: ResponseShape,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        // Space Coast: 12 = KSC, 27 = Cape Canaveral SFS, 80 = SLC
        let space_coast: Vec<String> = ["12", "27", "80"].iter().map(|s| s.to_string()).collect();
        Self {
            allowed_endpoints: vec![LaunchEndpoint::Upcoming, LaunchEndpoint::Previous],
            allowed_location_ids: space_coast.clone(),
            default_location_ids: space_coast,
            default_limit: Some(20),
            default_window_days: 14,
            response_shape: ResponseShape::Projected,
        }
    }
}

/// Cache-Control directives for successful responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Shared (edge) cache lifetime in seconds.
    pub s_maxage_secs: u64,

    /// Window in which a stale copy may be served while revalidating.
    pub stale_while_revalidate_secs: u64,
}

impl CacheConfig {
    /// Render the `Cache-Control` header value.
    pub fn header_value(&self) -> String {
        format!(
            "s-maxage={}, stale-while-revalidate={}",
            self.s_maxage_secs, self.stale_while_revalidate_secs
        )
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            s_maxage_secs: 300,
            stale_while_revalidate_secs: 60,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
