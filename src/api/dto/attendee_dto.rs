//! Attendee DTOs for registration, check-in, and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Attendee, AttendeeId, AttendeeStatus, EventId, NewAttendee};

/// Request body for `POST /events/:id/attendees`.
///
/// Names default to empty so that a missing field surfaces as the
/// gateway's own validation error.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAttendeeRequest {
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Optional email.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional phone.
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<RegisterAttendeeRequest> for NewAttendee {
    fn from(req: RegisterAttendeeRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
        }
    }
}

/// Query parameters for `GET /events/:id/attendees`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendeeListQuery {
    /// Only return attendees with this status.
    #[serde(default)]
    pub status: Option<AttendeeStatus>,
}

/// Attendee representation returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeDto {
    /// Attendee identifier.
    pub id: AttendeeId,
    /// Owning event.
    pub event_id: EventId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// `"{first} {last}"`.
    pub full_name: String,
    /// Email.
    pub email: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Workflow status.
    pub status: AttendeeStatus,
    /// Latest check-in time.
    pub check_in_time: Option<DateTime<Utc>>,
    /// Whether a certificate was issued.
    pub certificate_issued: bool,
    /// When the certificate was issued.
    pub certificate_issued_at: Option<DateTime<Utc>>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Attendee> for AttendeeDto {
    fn from(attendee: Attendee) -> Self {
        Self {
            full_name: attendee.full_name(),
            id: attendee.id,
            event_id: attendee.event_id,
            first_name: attendee.first_name,
            last_name: attendee.last_name,
            email: attendee.email,
            phone: attendee.phone,
            status: attendee.status,
            check_in_time: attendee.check_in_time,
            certificate_issued: attendee.certificate_issued,
            certificate_issued_at: attendee.certificate_issued_at,
            created_at: attendee.created_at,
        }
    }
}

/// List response for `GET /events/:id/attendees`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendeeListResponse {
    /// Attendees ordered by first name.
    pub data: Vec<AttendeeDto>,
}
