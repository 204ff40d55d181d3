//! Launch data proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                LAUNCH PROXY                  │
//!    Browser             │  ┌─────────┐   ┌───────────┐   ┌──────────┐  │
//!    GET /launches ──────┼─▶│  http   │──▶│ launches  │──▶│ upstream │──┼──▶ Launch API
//!                        │  │ server  │   │  query +  │   │  client  │  │   (token added)
//!    JSON + cache ◀──────┼──│ + CORS  │◀──│ projection│◀──│          │◀─┼───
//!    headers             │  └─────────┘   └───────────┘   └──────────┘  │
//!                        │                                              │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use launch_proxy::http::HttpServer;
use launch_proxy::lifecycle::{signals, Shutdown, Startup};
use launch_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "launch-proxy")]
#[command(about = "Proxy for upcoming and previous launch listings", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long, env = "LAUNCH_PROXY_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let Startup { config, token } = Startup::load(cli.config.as_deref(), cli.bind)?;

    logging::init(&config.observability);

    tracing::info!("launch-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        response_shape = ?config.policy.response_shape,
        token_present = token.is_some(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, token)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
