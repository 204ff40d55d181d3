//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, CORS headers)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{ApiToken, ProxyConfig};
use crate::http::health::health_handler;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::{cors_expose_headers_layer, cors_origin_layer};
use crate::launches::handler::launches_handler;
use crate::launches::upstream::BuildError;
use crate::launches::LaunchProxy;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<LaunchProxy>,
}

/// HTTP server for the launch proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and API token.
    ///
    /// A missing token is not an error here: the server starts and answers
    /// every launches GET with 500 until it is redeployed with one.
    pub fn new(config: ProxyConfig, token: Option<ApiToken>) -> Result<Self, BuildError> {
        let proxy = LaunchProxy::new(&config, token.as_ref())?;
        if !proxy.is_configured() {
            tracing::error!(
                token_env = %config.upstream.token_env,
                "Launch API token missing; /launches will answer 500"
            );
        }

        let state = AppState {
            proxy: Arc::new(proxy),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/launches", any(launches_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
            .layer(cors_expose_headers_layer())
            .layer(cors_origin_layer())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
