//! REST endpoint handlers organized by resource.

pub mod attendees;
pub mod certificates;
pub mod events;
pub mod stats;
pub mod system;

use axum::Router;

use crate::app_state::AppState;
use crate::domain::{AttendeeId, CertificateId, EventId};
use crate::error::GatewayError;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(system::api_routes())
        .merge(events::routes())
        .merge(attendees::routes())
        .merge(certificates::routes())
        .merge(stats::routes())
}

// ── Path Id Helpers ─────────────────────────────────────────────────────
//
// A malformed id cannot name a stored record, so it is reported as the
// matching not-found error rather than a 400.

pub(crate) fn parse_event_id(raw: &str) -> Result<EventId, GatewayError> {
    raw.parse()
        .map_err(|_| GatewayError::EventNotFound(raw.to_string()))
}

pub(crate) fn parse_attendee_id(raw: &str) -> Result<AttendeeId, GatewayError> {
    raw.parse()
        .map_err(|_| GatewayError::AttendeeNotFound(raw.to_string()))
}

pub(crate) fn parse_certificate_id(raw: &str) -> Result<CertificateId, GatewayError> {
    raw.parse()
        .map_err(|_| GatewayError::CertificateNotFound(raw.to_string()))
}
