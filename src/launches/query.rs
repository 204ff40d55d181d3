//! Inbound query validation and upstream parameter construction.
//!
//! Only `endpoint`, `location__ids` and the pass-through set below are read
//! from the caller. Everything else in the query string is dropped.

use chrono::{DateTime, Duration, Utc};
use url::form_urlencoded;

use crate::config::PolicyConfig;
use crate::launches::endpoint::LaunchEndpoint;
use crate::launches::error::LaunchError;

pub const ENDPOINT_PARAM: &str = "endpoint";
pub const LOCATION_PARAM: &str = "location__ids";
pub const NET_GTE_PARAM: &str = "net__gte";
pub const NET_LTE_PARAM: &str = "net__lte";

/// Forwarded verbatim (after decoding) when present and non-empty.
pub const PASS_THROUGH_PARAMS: [&str; 7] = [
    NET_GTE_PARAM,
    NET_LTE_PARAM,
    "limit",
    "offset",
    "mode",
    "search",
    "ordering",
];

/// Upstream `net` bounds use minute precision.
const NET_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// A validated launches request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchQuery {
    pub endpoint: LaunchEndpoint,
    /// Caller-supplied facility ids, all members of the allow-list. Empty when
    /// the caller sent none.
    pub location_ids: Vec<String>,
    /// Pass-through parameters in [`PASS_THROUGH_PARAMS`] order.
    pub params: Vec<(&'static str, String)>,
}

impl LaunchQuery {
    /// Parse and validate a raw (still percent-encoded) query string.
    pub fn parse(raw: Option<&str>, policy: &PolicyConfig) -> Result<Self, LaunchError> {
        let pairs: Vec<(String, String)> = form_urlencoded::parse(raw.unwrap_or_default().as_bytes())
            .into_owned()
            .collect();
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        let endpoint = match first(ENDPOINT_PARAM).map(str::trim).filter(|v| !v.is_empty()) {
            None => {
                return Err(LaunchError::MissingEndpoint {
                    allowed: policy.allowed_endpoints.clone(),
                })
            }
            Some(raw) => raw
                .parse::<LaunchEndpoint>()
                .ok()
                .filter(|e| policy.allowed_endpoints.contains(e))
                .ok_or_else(|| LaunchError::InvalidEndpoint {
                    allowed: policy.allowed_endpoints.clone(),
                })?,
        };

        let location_ids = match first(LOCATION_PARAM).filter(|v| !v.trim().is_empty()) {
            None => Vec::new(),
            Some(raw) => parse_location_ids(raw, &policy.allowed_location_ids)?,
        };

        let params = PASS_THROUGH_PARAMS
            .iter()
            .filter_map(|&name| {
                first(name)
                    .filter(|v| !v.is_empty())
                    .map(|v| (name, v.to_string()))
            })
            .collect();

        Ok(Self {
            endpoint,
            location_ids,
            params,
        })
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters for the upstream call, with server defaults filled in.
    pub fn upstream_params(&self, policy: &PolicyConfig, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(self.params.len() + 4);

        let locations = if self.location_ids.is_empty() {
            &policy.default_location_ids
        } else {
            &self.location_ids
        };
        if !locations.is_empty() {
            out.push((LOCATION_PARAM, locations.join(",")));
        }

        let upcoming = self.endpoint == LaunchEndpoint::Upcoming;
        let has_bounds = self.param(NET_GTE_PARAM).is_some() || self.param(NET_LTE_PARAM).is_some();
        if upcoming && !has_bounds && policy.default_window_days > 0 {
            let until = now + Duration::days(i64::from(policy.default_window_days));
            out.push((NET_GTE_PARAM, now.format(NET_FORMAT).to_string()));
            out.push((NET_LTE_PARAM, until.format(NET_FORMAT).to_string()));
        }

        out.extend(self.params.iter().cloned());

        if self.param("limit").is_none() {
            if let Some(limit) = policy.default_limit {
                out.push(("limit", limit.to_string()));
            }
        }
        if upcoming && self.param("ordering").is_none() {
            out.push(("ordering", "net".to_string()));
        }

        out
    }
}

/// Split a decoded `location__ids` value and check every token.
fn parse_location_ids(raw: &str, allowed: &[String]) -> Result<Vec<String>, LaunchError> {
    let tokens: Vec<String> = raw.split(',').map(|t| t.trim().to_string()).collect();
    let invalid: Vec<String> = tokens
        .iter()
        .filter(|t| !allowed.contains(t))
        .cloned()
        .collect();

    if invalid.is_empty() {
        Ok(tokens)
    } else {
        Err(LaunchError::InvalidLocation {
            invalid,
            allowed: allowed.to_vec(),
        })
    }
}
