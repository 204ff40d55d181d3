//! Launch data proxy library.
//!
//! Forwards browser requests for upcoming and previous launches to the
//! upstream launch API, holding the API token server-side.

pub mod config;
pub mod http;
pub mod launches;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
