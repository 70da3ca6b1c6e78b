//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Archive**: Opens the zip and looks up the tweets entry
/// 2. **Cache**: Snapshot cache backend
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "archive": { "status": "ok", "message": "Archive readable" },
///     "cache": { "status": "ok", "message": "Cache backend: disabled" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let archive_check = check_archive(&state).await;

    let cache_check = check_cache(&state).await;

    let all_healthy = archive_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            archive: archive_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_archive(state: &AppState) -> CheckStatus {
    match state.repository.health_check().await {
        Ok(()) => CheckStatus::ok("Archive readable"),
        Err(e) => CheckStatus::error(e.to_string()),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let name = state.cache.name();
    if state.cache.health_check().await {
        CheckStatus::ok(format!("Cache backend: {}", name))
    } else {
        CheckStatus::error(format!("Cache backend {} unavailable", name))
    }
}
