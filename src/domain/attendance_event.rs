//! Domain events reflecting attendance workflow mutations.
//!
//! Every state change emits an [`AttendanceEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers
//! watching the affected event.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AttendeeId, CertificateId, EventId, EventStatus};

/// Domain event emitted after every workflow mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AttendanceEvent {
    /// Emitted when an organizer creates an event.
    EventCreated {
        /// Event identifier.
        event_id: EventId,
        /// Event name.
        name: String,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an event's status changes.
    EventStatusChanged {
        /// Event identifier.
        event_id: EventId,
        /// Status before the change.
        old_status: EventStatus,
        /// Status after the change.
        new_status: EventStatus,
        /// Change timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a successful registration.
    AttendeeRegistered {
        /// Event identifier.
        event_id: EventId,
        /// New attendee.
        attendee_id: AttendeeId,
        /// `"{first} {last}"`.
        attendee_name: String,
        /// Registration timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted on every check-in, including repeats.
    AttendeeCheckedIn {
        /// Event identifier.
        event_id: EventId,
        /// Checked-in attendee.
        attendee_id: AttendeeId,
        /// `"{first} {last}"`.
        attendee_name: String,
        /// Check-in timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a new certificate is stored. Replays do not emit.
    CertificateIssued {
        /// Event identifier.
        event_id: EventId,
        /// Certified attendee.
        attendee_id: AttendeeId,
        /// New certificate.
        certificate_id: CertificateId,
        /// Certificate number.
        certificate_number: String,
        /// Issue timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl AttendanceEvent {
    /// Returns the event ID associated with this domain event.
    #[must_use]
    pub fn event_id(&self) -> EventId {
        match self {
            Self::EventCreated { event_id, .. }
            | Self::EventStatusChanged { event_id, .. }
            | Self::AttendeeRegistered { event_id, .. }
            | Self::AttendeeCheckedIn { event_id, .. }
            | Self::CertificateIssued { event_id, .. } => *event_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::EventStatusChanged { .. } => "event_status_changed",
            Self::AttendeeRegistered { .. } => "attendee_registered",
            Self::AttendeeCheckedIn { .. } => "attendee_checked_in",
            Self::CertificateIssued { .. } => "certificate_issued",
        }
    }
}
