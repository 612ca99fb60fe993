//! System endpoints: health check and current principal.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::SessionContext;
use crate::error::ErrorResponse;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health`: Service health status.
///
/// Reports `degraded` with 503 when the store does not answer.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, label) = match state.attendance_service.store().ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            tracing::warn!(error = %e, "store ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        }
    };
    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /me`: The principal resolved from the bearer token.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "System",
    summary = "Current principal",
    responses(
        (status = 200, description = "Resolved session", body = SessionContext),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn me_handler(ctx: SessionContext) -> impl IntoResponse {
    Json(ctx)
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

/// System routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/me", get(me_handler))
}
