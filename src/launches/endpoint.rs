//! Upstream launch listing endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A launch listing endpoint on the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LaunchEndpoint {
    #[serde(rename = "launch/upcoming")]
    Upcoming,
    #[serde(rename = "launch/previous")]
    Previous,
}

impl LaunchEndpoint {
    /// Path segment relative to the upstream base URL.
    pub fn as_path(&self) -> &'static str {
        match self {
            LaunchEndpoint::Upcoming => "launch/upcoming",
            LaunchEndpoint::Previous => "launch/previous",
        }
    }
}

impl fmt::Display for LaunchEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for LaunchEndpoint {
    type Err = ();

    /// Surrounding slashes are ignored: `/launch/upcoming/` parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('/') {
            "launch/upcoming" => Ok(LaunchEndpoint::Upcoming),
            "launch/previous" => Ok(LaunchEndpoint::Previous),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("launch/upcoming".parse(), Ok(LaunchEndpoint::Upcoming));
        assert_eq!("/launch/previous/".parse(), Ok(LaunchEndpoint::Previous));
        assert!("launch".parse::<LaunchEndpoint>().is_err());
        assert!("launch/upcoming/../../admin".parse::<LaunchEndpoint>().is_err());
        assert!("LAUNCH/UPCOMING".parse::<LaunchEndpoint>().is_err());
    }
}
