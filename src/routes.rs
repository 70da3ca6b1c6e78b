//! Top-level router for the HTTP transport.
//!
//! # Route Structure
//!
//! - `POST /mcp`     - JSON-RPC endpoint
//! - `GET  /health`  - Health check: archive, cache
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes with state applied, without the outer middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::mcp_routes())
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = router(state).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
