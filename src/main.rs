//! Customer REST API server
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ admin gate ──▶ routing::Router ──▶ customers / admin
//!                     (trace, id,      (/admin only,   (method + path →    handlers
//!                      timeout)         Basic auth)     handler, params)      │
//!                                                                              ▼
//!     Client Response                                                    store::Store
//!     ◀────────────── http::response ◀──────────────────────────────── (one lock, clones)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use customer_api::config::load_config;
use customer_api::lifecycle::{wait_for_signal, Shutdown};
use customer_api::observability::{logging, metrics};
use customer_api::HttpServer;

#[derive(Parser)]
#[command(name = "customer-api")]
#[command(about = "In-memory customer and order REST API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CUSTOMER_API_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("customer-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        admin_enabled = !config.admin.username.is_empty(),
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let signal = shutdown.signal();

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
