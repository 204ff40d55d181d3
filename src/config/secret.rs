//! Upstream API token.
//!
//! The token is read once at startup and handed to the upstream client. It is
//! never logged and never serialized into a response.

use std::fmt;

/// Secret credential for the upstream launch API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token. Blank values are treated as absent.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Read the token from the named environment variable.
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var).ok().and_then(Self::new)
    }

    /// Value for the upstream `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Token {}", self.0)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_absent() {
        assert!(ApiToken::new("").is_none());
        assert!(ApiToken::new("   \n").is_none());
    }

    #[test]
    fn test_token_is_trimmed() {
        let token = ApiToken::new(" abc123\n").unwrap();
        assert_eq!(token.authorization(), "Token abc123");
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = ApiToken::new("super-secret").unwrap();
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("super-secret"));
        assert_eq!(rendered, "ApiToken(***)");
    }

    #[test]
    fn test_missing_env_var() {
        assert!(ApiToken::from_env("LAUNCH_PROXY_TEST_UNSET_TOKEN_VAR").is_none());
    }
}
