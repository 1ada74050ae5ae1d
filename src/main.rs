//! Football Match Tracker
//!
//! A small JSON API over football matches, built with Tokio, Axum and sqlx.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ http (cors, request id, limits, timeout)
//!                          │
//!                          ▼
//!                      api handlers ──▶ model (validation)
//!                          │
//!                          ▼
//!                      store (MatchStore)
//!                        ├── PostgresStore (sqlx pool)
//!                        └── MemoryStore
//!
//!     Cross-cutting: config, observability, resilience, lifecycle
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use match_tracker::config::{resolve_config, Overrides};
use match_tracker::lifecycle::{open_store, wait_for_signal, Shutdown};
use match_tracker::observability::{logging, metrics};
use match_tracker::store::StoreKind;
use match_tracker::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "match-tracker", version, about = "Football match tracking API")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "MATCH_TRACKER_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8080
    #[arg(short, long)]
    bind: Option<String>,

    /// Storage backend
    #[arg(short, long, value_enum)]
    store: Option<StoreKind>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal outside development.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let overrides = Overrides {
        bind_address: args.bind,
        store: args.store,
    };
    let config = match resolve_config(args.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("match-tracker: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "match-tracker starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        store = %config.store.backend,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
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

    let store = match open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Could not open match store");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config, store);
    if let Err(e) = server.run(listener, server_shutdown).await {
        tracing::error!(error = %e, "HTTP server failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
