//! Reduced launch projection.
//!
//! These types deserialize straight from the upstream payload; serde skips
//! every field not listed here, so serializing them back yields the reduced
//! shape the frontend consumes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Page envelope shared by upstream and projected bodies.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LaunchPage {
    pub count: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<LaunchSummary>,
}

// Leaves stay untyped: upstream API versions disagree on their JSON types
// (`image` is a URL in 2.2.0 and an object in 2.3.0) and they are copied
// through as received.

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LaunchSummary {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub net: Option<Value>,
    pub status: Option<LaunchStatus>,
    pub launch_service_provider: Option<ServiceProvider>,
    pub rocket: Option<Rocket>,
    pub mission: Option<Mission>,
    pub pad: Option<Pad>,
    pub image: Option<Value>,
    #[serde(rename = "vidURLs", default, deserialize_with = "null_as_default")]
    pub vid_urls: Vec<Value>,
    pub webcast_live: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LaunchStatus {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub abbrev: Option<Value>,
    pub description: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceProvider {
    pub name: Option<Value>,
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Rocket {
    pub configuration: Option<RocketConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RocketConfiguration {
    pub name: Option<Value>,
    pub full_name: Option<Value>,
    pub variant: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Mission {
    pub name: Option<Value>,
    pub description: Option<Value>,
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    pub orbit: Option<Orbit>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Orbit {
    pub name: Option<Value>,
    pub abbrev: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Pad {
    pub name: Option<Value>,
    pub location: Option<PadLocation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PadLocation {
    pub name: Option<Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Project an upstream payload into the reduced launch shape.
pub fn project(payload: &[u8]) -> Result<LaunchPage, serde_json::Error> {
    serde_json::from_slice(payload)
}
