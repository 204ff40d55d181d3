//! Launch listing proxy.
//!
//! # Data Flow
//! ```text
//! GET /launches?endpoint=…
//!     → handler.rs (extract method + raw query, log, metrics)
//!     → proxy.rs (method / token checks, orchestration)
//!     → query.rs (validate endpoint + location__ids, fill defaults)
//!     → upstream.rs (authenticated GET to the launch API)
//!     → projection.rs (reduce the payload, unless raw mode)
//!     → error.rs / rate_limit.rs (status + header translation)
//! ```
//!
//! # Design Decisions
//! - Client errors are detected before any network call
//! - The API token is injected once at construction, never read per request
//! - Upstream error bodies are never echoed to the caller

pub mod endpoint;
pub mod error;
pub mod handler;
pub mod projection;
pub mod proxy;
pub mod query;
pub mod rate_limit;
pub mod upstream;

pub use endpoint::LaunchEndpoint;
pub use error::LaunchError;
pub use proxy::LaunchProxy;
