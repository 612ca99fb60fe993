//! Persistence layer: the storage port and its implementations.
//!
//! [`AttendanceStore`] is the single storage interface injected into the
//! service at startup. [`memory::MemoryStore`] keeps records in process;
//! [`postgres::PostgresStore`] uses `sqlx::PgPool`.
//!
//! Certificate issuance is insert-if-absent: the store returns the existing
//! certificate for an `(attendee, event)` pair or atomically inserts the new
//! one and flags the attendee as certified.

pub mod memory;
pub mod models;
pub mod postgres;

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};

use crate::domain::{
    Attendee, AttendeeId, AttendeeStatus, Certificate, CertificateId, Event, EventId,
    IssueOutcome,
};
use crate::error::GatewayError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Boxed future returned by [`AttendanceStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, GatewayError>> + Send + 'a>>;

/// Record-oriented storage for events, attendees and certificates.
///
/// Methods return boxed futures so the store can be shared as
/// `Arc<dyn AttendanceStore>`.
pub trait AttendanceStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new event.
    fn insert_event(&self, event: Event) -> StoreFuture<'_, Event>;

    /// Point lookup of an event.
    fn get_event(&self, id: EventId) -> StoreFuture<'_, Option<Event>>;

    /// All events, most recent event date first.
    fn list_events(&self) -> StoreFuture<'_, Vec<Event>>;

    /// Replaces a stored event by id.
    ///
    /// Fails with [`GatewayError::EventNotFound`] if it does not exist.
    fn update_event(&self, event: Event) -> StoreFuture<'_, Event>;

    /// Inserts a new attendee.
    fn insert_attendee(&self, attendee: Attendee) -> StoreFuture<'_, Attendee>;

    /// Point lookup of an attendee.
    fn get_attendee(&self, id: AttendeeId) -> StoreFuture<'_, Option<Attendee>>;

    /// Attendees, optionally restricted to one event and/or status,
    /// ordered by first name.
    fn list_attendees(
        &self,
        event_id: Option<EventId>,
        status: Option<AttendeeStatus>,
    ) -> StoreFuture<'_, Vec<Attendee>>;

    /// Sets the attendee checked in at `at`, overwriting any earlier time.
    ///
    /// Fails with [`GatewayError::AttendeeNotFound`] if it does not exist.
    fn check_in_attendee(&self, id: AttendeeId, at: DateTime<Utc>)
    -> StoreFuture<'_, Attendee>;

    /// Stores `certificate` unless one already exists for its pair.
    ///
    /// On insert, the attendee's certificate flag and issue time are set in
    /// the same atomic step.
    fn issue_certificate(&self, certificate: Certificate) -> StoreFuture<'_, IssueOutcome>;

    /// Certificate for an `(attendee, event)` pair, if any.
    fn find_certificate(
        &self,
        attendee_id: AttendeeId,
        event_id: EventId,
    ) -> StoreFuture<'_, Option<Certificate>>;

    /// Point lookup of a certificate.
    fn get_certificate(&self, id: CertificateId) -> StoreFuture<'_, Option<Certificate>>;

    /// Certificates, optionally restricted to one event, newest first.
    fn list_certificates(&self, event_id: Option<EventId>)
    -> StoreFuture<'_, Vec<Certificate>>;

    /// Checks the store is reachable.
    fn ping(&self) -> StoreFuture<'_, ()>;
}
