//! Attendance statistics handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::parse_event_id;
use crate::app_state::AppState;
use crate::domain::{EventStats, OverviewStats, SessionContext};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /events/:id/stats`: Counters for one event.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`].
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/stats",
    tag = "Statistics",
    summary = "Event statistics",
    description = "Registered, checked-in, and certified counts plus the attendance rate.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event statistics", body = EventStats),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn event_stats(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let event_id = parse_event_id(&id)?;
    let stats = state.attendance_service.event_stats(&ctx, event_id).await?;
    Ok(Json(stats))
}

/// `GET /stats`: Counters across all events.
///
/// # Errors
///
/// Returns [`GatewayError::Store`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "Statistics",
    summary = "Overview statistics",
    responses(
        (status = 200, description = "Overview statistics", body = OverviewStats),
    )
)]
pub async fn overview_stats(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> Result<impl IntoResponse, GatewayError> {
    let stats = state.attendance_service.overview_stats(&ctx).await?;
    Ok(Json(stats))
}

/// Statistics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/{id}/stats", get(event_stats))
        .route("/stats", get(overview_stats))
}
