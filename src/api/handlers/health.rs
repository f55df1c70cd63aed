//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable, body `{"ok": true, "version": "..."}`
/// - **503 Service Unavailable**: Storage unreachable
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let version = env!("CARGO_PKG_VERSION").to_string();

    match state.link_service.health_check().await {
        Ok(()) => Ok(Json(HealthResponse {
            ok: true,
            version,
            message: None,
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    ok: false,
                    version,
                    message: Some("Database unreachable".to_string()),
                }),
            ))
        }
    }
}
