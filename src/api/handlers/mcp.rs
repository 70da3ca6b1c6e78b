//! Handler for the HTTP protocol endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::handlers::rpc::handle_message;
use crate::state::AppState;

/// Accepts one JSON-RPC message per request.
///
/// # Endpoint
///
/// `POST /mcp`
///
/// # Response Codes
///
/// - **200 OK**: JSON-RPC response body (including JSON-RPC errors)
/// - **202 Accepted**: the message was a notification
///
/// # Example
///
/// ```json
/// {"jsonrpc": "2.0", "id": 1, "method": "resources/read", "params": {"uri": "tweet://42"}}
/// ```
pub async fn mcp_handler(State(state): State<AppState>, body: String) -> Response {
    match handle_message(&state, &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
