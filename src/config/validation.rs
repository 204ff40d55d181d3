//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the location defaults are a subset of the allow-list
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.base_url: {0}")]
    InvalidBaseUrl(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field}: location id '{value}' is not numeric")]
    NonNumericLocation { field: &'static str, value: String },

    #[error("policy.default_location_ids: '{0}' is not in allowed_location_ids")]
    DefaultLocationNotAllowed(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("timeouts.request_secs ({request_secs}) must exceed the upstream connect + request timeouts ({upstream_secs})")]
    InboundTimeoutTooShort { request_secs: u64, upstream_secs: u64 },
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidBaseUrl(format!(
            "unsupported scheme '{}'",
            url.scheme()
        ))),
        Err(e) => errors.push(ValidationError::InvalidBaseUrl(e.to_string())),
    }

    if config.upstream.token_env.trim().is_empty() {
        errors.push(ValidationError::Empty("upstream.token_env"));
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.request_timeout_secs"));
    }
    if config.upstream.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("upstream.max_body_bytes"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    } else {
        // Inbound deadline must outlast the whole upstream call.
        let upstream_secs = config
            .upstream
            .connect_timeout_secs
            .saturating_add(config.upstream.request_timeout_secs);
        if config.timeouts.request_secs <= upstream_secs {
            errors.push(ValidationError::InboundTimeoutTooShort {
                request_secs: config.timeouts.request_secs,
                upstream_secs,
            });
        }
    }

    let policy = &config.policy;
    if policy.allowed_endpoints.is_empty() {
        errors.push(ValidationError::Empty("policy.allowed_endpoints"));
    }
    if policy.allowed_location_ids.is_empty() {
        errors.push(ValidationError::Empty("policy.allowed_location_ids"));
    }
    for id in &policy.allowed_location_ids {
        if !is_numeric(id) {
            errors.push(ValidationError::NonNumericLocation {
                field: "policy.allowed_location_ids",
                value: id.clone(),
            });
        }
    }
    for id in &policy.default_location_ids {
        if !is_numeric(id) {
            errors.push(ValidationError::NonNumericLocation {
                field: "policy.default_location_ids",
                value: id.clone(),
            });
        } else if !policy.allowed_location_ids.contains(id) {
            errors.push(ValidationError::DefaultLocationNotAllowed(id.clone()));
        }
    }
    if policy.default_limit == Some(0) {
        errors.push(ValidationError::Zero("policy.default_limit"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
