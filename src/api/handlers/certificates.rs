//! Certificate handlers: issue, fetch, list, and SVG rendering.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::{parse_attendee_id, parse_certificate_id, parse_event_id};
use crate::api::dto::{
    CertificateDto, CertificateListResponse, CertificateResponse, GenerateCertificateRequest,
    PreviewCertificateRequest, SvgQuery,
};
use crate::app_state::AppState;
use crate::domain::SessionContext;
use crate::domain::certificate_svg::{SVG_CONTENT_TYPE, parse_issue_date, render_certificate_svg};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /certificates/generate`: Issue (or replay) a certificate.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] when either id is missing,
/// [`GatewayError::AttendeeNotFound`] / [`GatewayError::EventNotFound`]
/// when a record is absent, or [`GatewayError::Store`].
#[utoipa::path(
    post,
    path = "/api/v1/certificates/generate",
    tag = "Certificates",
    summary = "Generate certificate",
    description = "Issues the certificate for an attendee and event. Repeating the call returns the certificate issued the first time.",
    request_body = GenerateCertificateRequest,
    responses(
        (status = 200, description = "Certificate issued or replayed", body = CertificateResponse),
        (status = 400, description = "Missing attendeeId or eventId", body = ErrorResponse),
        (status = 404, description = "Attendee or event not found", body = ErrorResponse),
        (status = 409, description = "Attendee has not checked in", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn generate_certificate(
    State(state): State<AppState>,
    ctx: SessionContext,
    payload: Result<Json<GenerateCertificateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let (Some(attendee_id), Some(event_id)) = (non_empty(req.attendee_id), non_empty(req.event_id))
    else {
        return Err(GatewayError::Validation(
            "Missing attendeeId or eventId".to_string(),
        ));
    };
    let attendee_id = parse_attendee_id(&attendee_id)?;
    let Ok(event_id) = parse_event_id(&event_id) else {
        // The attendee is looked up first, so an unknown attendee wins.
        state
            .attendance_service
            .get_attendee(&ctx, attendee_id)
            .await?;
        return Err(GatewayError::EventNotFound(event_id));
    };

    let issued = state
        .attendance_service
        .issue_certificate(&ctx, attendee_id, event_id)
        .await?;
    Ok(Json(CertificateResponse {
        certificate: CertificateDto::from(issued),
    }))
}

/// `GET /certificates/:id`: Fetch one certificate.
///
/// # Errors
///
/// Returns [`GatewayError::CertificateNotFound`].
#[utoipa::path(
    get,
    path = "/api/v1/certificates/{id}",
    tag = "Certificates",
    summary = "Get certificate",
    params(
        ("id" = uuid::Uuid, Path, description = "Certificate UUID"),
    ),
    responses(
        (status = 200, description = "Certificate", body = CertificateResponse),
        (status = 404, description = "Certificate not found", body = ErrorResponse),
    )
)]
pub async fn get_certificate(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let certificate_id = parse_certificate_id(&id)?;
    let issued = state
        .attendance_service
        .get_certificate(&ctx, certificate_id)
        .await?;
    Ok(Json(CertificateResponse {
        certificate: CertificateDto::from(issued),
    }))
}

/// `GET /certificates/:id/svg`: Download the rendered certificate.
///
/// # Errors
///
/// Returns [`GatewayError::CertificateNotFound`].
#[utoipa::path(
    get,
    path = "/api/v1/certificates/{id}/svg",
    tag = "Certificates",
    summary = "Render certificate",
    description = "Returns the certificate as SVG. Served as an attachment named after the certificate number unless `inline=true`.",
    params(
        ("id" = uuid::Uuid, Path, description = "Certificate UUID"),
        SvgQuery,
    ),
    responses(
        (status = 200, description = "SVG document", content_type = "image/svg+xml", body = String),
        (status = 404, description = "Certificate not found", body = ErrorResponse),
    )
)]
pub async fn download_certificate_svg(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
    Query(query): Query<SvgQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let certificate_id = parse_certificate_id(&id)?;
    let artifact = state
        .attendance_service
        .render_certificate(&ctx, certificate_id)
        .await?;

    let disposition = if query.inline {
        format!("inline; filename=\"{}\"", artifact.filename)
    } else {
        format!("attachment; filename=\"{}\"", artifact.filename)
    };
    Ok((
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.svg,
    ))
}

/// `POST /certificates/preview`: Render an unsaved certificate.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] for an unparseable issue date.
#[utoipa::path(
    post,
    path = "/api/v1/certificates/preview",
    tag = "Certificates",
    summary = "Preview certificate",
    description = "Renders the certificate template from the given fields without storing anything.",
    request_body = PreviewCertificateRequest,
    responses(
        (status = 200, description = "SVG document", content_type = "image/svg+xml", body = String),
        (status = 400, description = "Invalid issue date", body = ErrorResponse),
    )
)]
pub async fn preview_certificate(
    _ctx: SessionContext,
    payload: Result<Json<PreviewCertificateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let issued_on = parse_issue_date(&req.issue_date)?;
    let svg = render_certificate_svg(
        &req.attendee_name,
        &req.event_name,
        issued_on,
        &req.certificate_number,
    );
    Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg))
}

/// `GET /events/:id/certificates`: List an event's certificates.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`].
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/certificates",
    tag = "Certificates",
    summary = "List event certificates",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Certificates, newest first", body = CertificateListResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_event_certificates(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let event_id = parse_event_id(&id)?;
    let issued = state
        .attendance_service
        .list_certificates(&ctx, event_id)
        .await?;
    Ok(Json(CertificateListResponse {
        data: issued.into_iter().map(CertificateDto::from).collect(),
    }))
}

/// Certificate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/certificates/generate", post(generate_certificate))
        .route("/certificates/preview", post(preview_certificate))
        .route("/certificates/{id}", get(get_certificate))
        .route("/certificates/{id}/svg", get(download_certificate_svg))
        .route("/events/{id}/certificates", get(list_event_certificates))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
