//! Server initialization and runtime setup.
//!
//! Wires the archive repository, snapshot cache and services, then runs the
//! configured transport.

use crate::api::stdio::serve_stdio;
use crate::config::{Config, Transport};
use crate::domain::repositories::TweetRepository;
use crate::infrastructure::archive::ZipTweetRepository;
use crate::infrastructure::cache::{MemoryCache, NullCache, SnapshotCache};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the shared state from configuration.
pub fn build_state(config: &Config) -> AppState {
    let cache: Arc<dyn SnapshotCache> = if config.cache_enabled {
        tracing::info!("Snapshot cache enabled (memory)");
        Arc::new(MemoryCache::new())
    } else {
        tracing::info!("Snapshot cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let repository: Arc<dyn TweetRepository> = Arc::new(
        ZipTweetRepository::new(&config.archive_path)
            .with_cache(cache.clone())
            .with_max_payload_bytes(config.max_payload_bytes),
    );

    AppState::new(repository, cache, config.default_sample_size)
}

/// Runs the server with the given configuration.
///
/// With the stdio transport this returns when stdin closes; with HTTP it
/// returns after Ctrl+C.
///
/// # Errors
///
/// Returns an error if:
/// - stdin/stdout fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config);

    match config.transport {
        Transport::Stdio => serve_stdio(state).await.context("stdio transport failed"),
        Transport::Http => serve_http(state, &config.listen_addr).await,
    }
}

async fn serve_http(state: AppState, listen_addr: &str) -> Result<()> {
    let app = app_router(state);

    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}/mcp");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
