//! Domain layer: records, workflow rules, and the event system.
//!
//! This module contains the attendance domain model: typed identifiers,
//! events, attendees and certificates with their invariants, the pure
//! certificate renderer, the request-scoped session context, and the event
//! bus for broadcasting workflow changes.

pub mod attendance_event;
pub mod attendee;
pub mod certificate;
pub mod certificate_svg;
pub mod event;
pub mod event_bus;
pub mod ids;
pub mod session;
pub mod stats;

pub use attendance_event::AttendanceEvent;
pub use attendee::{Attendee, AttendeeStatus, NewAttendee};
pub use certificate::{Certificate, IssueOutcome, IssuedCertificate};
pub use event::{Event, EventPatch, EventStatus, NewEvent};
pub use event_bus::EventBus;
pub use ids::{AttendeeId, CertificateId, EventId};
pub use session::{Role, SessionContext};
pub use stats::{EventStats, OverviewStats};
