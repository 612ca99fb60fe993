//! Event handlers: create, list, get, update.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::parse_event_id;
use crate::api::dto::{
    CreateEventRequest, EventDto, EventListResponse, PaginationParams, UpdateEventRequest,
};
use crate::app_state::AppState;
use crate::domain::SessionContext;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /events`: Create an event (admin only).
///
/// # Errors
///
/// Returns [`GatewayError::Forbidden`] for non-admins or
/// [`GatewayError::Validation`] for invalid input.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates an event owned by the calling admin. Status defaults to `active`.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, description = "Invalid event", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    ctx: SessionContext,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let event = state
        .attendance_service
        .create_event(&ctx, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(EventDto::from(event))))
}

/// `GET /events`: List events, most recent date first.
///
/// # Errors
///
/// Returns [`GatewayError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns a paginated list of events ordered by event date, newest first.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated event list", body = EventListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    ctx: SessionContext,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let events = state.attendance_service.list_events(&ctx).await?;
    let (page, pagination) = params.paginate(events);
    Ok(Json(EventListResponse {
        data: page.into_iter().map(EventDto::from).collect(),
        pagination,
    }))
}

/// `GET /events/:id`: Get one event.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventDto),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let event_id = parse_event_id(&id)?;
    let event = state.attendance_service.get_event(&ctx, event_id).await?;
    Ok(Json(EventDto::from(event)))
}

/// `PATCH /events/:id`: Update an event (admin only).
///
/// # Errors
///
/// Returns [`GatewayError::Conflict`] when details change after check-in
/// has started, or [`GatewayError::EventNotFound`].
#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update event",
    description = "Applies a partial update. Once any attendee has checked in only `status` may change.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Updated event", body = EventDto),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Event details are locked", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let event_id = parse_event_id(&id)?;
    let event = state
        .attendance_service
        .update_event(&ctx, event_id, req.into())
        .await?;
    Ok(Json(EventDto::from(event)))
}

/// Event management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/events/{id}", get(get_event).patch(update_event))
}
