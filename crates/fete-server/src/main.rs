//! # fete-server
//!
//! Self-hosted object server for the Fete app.
//!
//! This binary provides:
//! - **Object storage** for shared photos and their sidecar descriptors
//!   (files stored as opaque bytes on disk under relative paths)
//! - **REST API** (axum) for health checks, instance info, object
//!   upload/download, and prefix listing
//!
//! Guests' app instances talk to it through the `fete-cloud` HTTP blob
//! store client; any static file server in front of the storage directory
//! also works for read-only access.

mod api;
mod config;
mod error;
mod object_store;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::object_store::ObjectStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fete_server=debug")),
        )
        .init();

    info!("Starting Fete object server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "configuration loaded");

    // -----------------------------------------------------------------------
    // 3. Initialize object storage
    // -----------------------------------------------------------------------
    let object_store =
        ObjectStore::new(config.storage_path.clone(), config.max_object_size).await?;

    // -----------------------------------------------------------------------
    // 4. Serve the HTTP API
    // -----------------------------------------------------------------------
    let state = AppState {
        object_store: Arc::new(object_store),
        config: Arc::new(config.clone()),
    };
    let router = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(addr = %config.http_addr, "HTTP API listening");

    axum::serve(listener, router).await?;

    Ok(())
}
