//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration (file optional, CLI overrides last)
//! - Read the API token once from the environment
//!
//! # Design Decisions
//! - Fail fast: an invalid config is fatal
//! - A missing token is not fatal; the server reports it per request

use std::path::Path;

use crate::config::validation::validate_config;
use crate::config::{load_config, ApiToken, ConfigError, ProxyConfig};

/// Everything `main` needs before binding the listener.
#[derive(Debug)]
pub struct Startup {
    pub config: ProxyConfig,
    pub token: Option<ApiToken>,
}

impl Startup {
    /// Resolve configuration and the API token.
    pub fn load(config_path: Option<&Path>, bind_override: Option<String>) -> Result<Self, ConfigError> {
        let config = resolve_config(config_path, bind_override)?;
        let token = ApiToken::from_env(&config.upstream.token_env);
        Ok(Self { config, token })
    }
}

fn resolve_config(config_path: Option<&Path>, bind_override: Option<String>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(bind) = bind_override {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(None, None).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_bind_override() {
        let config = resolve_config(None, Some("127.0.0.1:3000".into())).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_bind_override() {
        let err = resolve_config(None, Some("localhost".into())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_config_file() {
        let path = std::env::temp_dir().join("launch_proxy_startup_test.toml");
        std::fs::write(&path, "[listener]\nbind_address = \"127.0.0.1:4000\"\n").unwrap();

        let config = resolve_config(Some(&path), None).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
