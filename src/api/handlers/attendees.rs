//! Attendee handlers: register, list, check in.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use super::{parse_attendee_id, parse_event_id};
use crate::api::dto::{AttendeeDto, AttendeeListQuery, AttendeeListResponse, RegisterAttendeeRequest};
use crate::app_state::AppState;
use crate::domain::SessionContext;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /events/:id/attendees`: Register an attendee.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] when a name is missing or
/// [`GatewayError::EventNotFound`].
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/attendees",
    tag = "Attendees",
    summary = "Register attendee",
    description = "Registers an attendee for the event with status `registered`.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = RegisterAttendeeRequest,
    responses(
        (status = 201, description = "Attendee registered", body = AttendeeDto),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn register_attendee(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
    payload: Result<Json<RegisterAttendeeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let event_id = parse_event_id(&id)?;
    let attendee = state
        .attendance_service
        .register_attendee(&ctx, event_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(AttendeeDto::from(attendee))))
}

/// `GET /events/:id/attendees`: List an event's attendees.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`].
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/attendees",
    tag = "Attendees",
    summary = "List attendees",
    description = "Returns the event's attendees ordered by first name, optionally filtered by status.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
        AttendeeListQuery,
    ),
    responses(
        (status = 200, description = "Attendee list", body = AttendeeListResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_attendees(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
    Query(query): Query<AttendeeListQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let event_id = parse_event_id(&id)?;
    let attendees = state
        .attendance_service
        .list_attendees(&ctx, event_id, query.status)
        .await?;
    Ok(Json(AttendeeListResponse {
        data: attendees.into_iter().map(AttendeeDto::from).collect(),
    }))
}

/// `POST /attendees/:id/check-in`: Mark an attendee present.
///
/// # Errors
///
/// Returns [`GatewayError::AttendeeNotFound`].
#[utoipa::path(
    post,
    path = "/api/v1/attendees/{id}/check-in",
    tag = "Attendees",
    summary = "Check in attendee",
    description = "Sets status to `checked_in` and records the time. Repeating the call refreshes the time.",
    params(
        ("id" = uuid::Uuid, Path, description = "Attendee UUID"),
    ),
    responses(
        (status = 200, description = "Attendee checked in", body = AttendeeDto),
        (status = 404, description = "Attendee not found", body = ErrorResponse),
    )
)]
pub async fn check_in(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let attendee_id = parse_attendee_id(&id)?;
    let attendee = state.attendance_service.check_in(&ctx, attendee_id).await?;
    Ok(Json(AttendeeDto::from(attendee)))
}

/// Attendee routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/{id}/attendees",
            post(register_attendee).get(list_attendees),
        )
        .route("/attendees/{id}/check-in", post(check_in))
}
