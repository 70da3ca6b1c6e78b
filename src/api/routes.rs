//! Protocol route configuration.

use crate::api::handlers::mcp_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Protocol routes.
///
/// # Endpoints
///
/// - `POST /mcp` - One JSON-RPC message per request
pub fn mcp_routes() -> Router<AppState> {
    Router::new().route("/mcp", post(mcp_handler))
}
