//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (pings the database)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Returns 200 when storage answers, 503 with the error otherwise.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.projects.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "healthy": true,
                "storage": "ok",
                "imageBackend": state.images.kind().as_str(),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "healthy": false,
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
