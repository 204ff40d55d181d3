//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!
//! environment (token_env)
//!     → secret.rs (read once at startup)
//!     → ApiToken injected into the upstream client
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The API token never lives in the config file

pub mod loader;
pub mod schema;
pub mod secret;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    CacheConfig, ListenerConfig, LogFormat, ObservabilityConfig, PolicyConfig, ProxyConfig,
    ResponseShape, TimeoutConfig, UpstreamConfig,
};
pub use secret::ApiToken;
