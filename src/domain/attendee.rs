//! Attendees registered for a single event.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AttendeeId, EventId};
use crate::error::GatewayError;

/// Attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendeeStatus {
    /// Registered but not yet present.
    Registered,
    /// Marked as physically present.
    CheckedIn,
}

impl AttendeeStatus {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::CheckedIn => "checked_in",
        }
    }
}

impl fmt::Display for AttendeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendeeStatus {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "checked_in" => Ok(Self::CheckedIn),
            other => Err(GatewayError::Validation(format!(
                "invalid attendee status: {other}"
            ))),
        }
    }
}

/// A person registered for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee {
    /// Unique attendee identifier.
    pub id: AttendeeId,
    /// Owning event. Never changes.
    pub event_id: EventId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Attendance status.
    pub status: AttendeeStatus,
    /// Time of the latest check-in.
    pub check_in_time: Option<DateTime<Utc>>,
    /// Whether a certificate has been issued.
    pub certificate_issued: bool,
    /// Time the certificate was issued.
    pub certificate_issued_at: Option<DateTime<Utc>>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Attendee {
    /// Returns `"{first} {last}"`, the name printed on certificates.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns `true` once the attendee has been checked in.
    #[must_use]
    pub fn is_checked_in(&self) -> bool {
        self.status == AttendeeStatus::CheckedIn
    }

    /// Marks the attendee present at `at`.
    ///
    /// Repeating a check-in only refreshes the timestamp.
    pub fn check_in(&mut self, at: DateTime<Utc>) {
        self.status = AttendeeStatus::CheckedIn;
        self.check_in_time = Some(at);
    }

    /// Records certificate issuance at `at`.
    pub fn mark_certified(&mut self, at: DateTime<Utc>) {
        self.certificate_issued = true;
        self.certificate_issued_at = Some(at);
    }
}

/// Registration input. Validated by [`NewAttendee::into_attendee`].
#[derive(Debug, Clone, Default)]
pub struct NewAttendee {
    /// Given name (required).
    pub first_name: String,
    /// Family name (required).
    pub last_name: String,
    /// Optional email.
    pub email: Option<String>,
    /// Optional phone.
    pub phone: Option<String>,
}

impl NewAttendee {
    /// Validates the input and builds a registered [`Attendee`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if a name field is blank.
    /// Contact fields are stored as given, minus surrounding whitespace.
    pub fn into_attendee(
        self,
        event_id: EventId,
        now: DateTime<Utc>,
    ) -> Result<Attendee, GatewayError> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(GatewayError::Validation(
                "First name and last name are required".to_string(),
            ));
        }

        Ok(Attendee {
            id: AttendeeId::new(),
            event_id,
            first_name,
            last_name,
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            status: AttendeeStatus::Registered,
            check_in_time: None,
            certificate_issued: false,
            certificate_issued_at: None,
            created_at: now,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
