//! Attendance certificates and certificate number generation.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use super::{AttendeeId, CertificateId, EventId};

/// Prefix used when none is configured.
pub const DEFAULT_CERTIFICATE_PREFIX: &str = "VPAA";

/// Length of the random suffix appended to certificate numbers.
const SUFFIX_LEN: usize = 9;

/// An issued certificate. Immutable after creation.
///
/// At most one certificate exists per `(attendee_id, event_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Certificate {
    /// Unique certificate identifier.
    pub id: CertificateId,
    /// Certified attendee.
    pub attendee_id: AttendeeId,
    /// Event the attendee took part in.
    pub event_id: EventId,
    /// Human-readable certificate number.
    pub certificate_number: String,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    /// Builds a fresh certificate for the pair with a generated number.
    #[must_use]
    pub fn issue<R: Rng + ?Sized>(
        attendee_id: AttendeeId,
        event_id: EventId,
        prefix: &str,
        issued_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        Self {
            id: CertificateId::new(),
            attendee_id,
            event_id,
            certificate_number: generate_certificate_number(prefix, issued_at, rng),
            issued_at,
        }
    }
}

/// Result of an insert-if-absent issuance against the store.
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// The certificate now stored for the pair.
    pub certificate: Certificate,
    /// `false` when an earlier certificate was returned unchanged.
    pub created: bool,
}

/// A certificate together with the names it certifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCertificate {
    /// The stored record.
    pub certificate: Certificate,
    /// `"{first} {last}"` of the attendee.
    pub attendee_name: String,
    /// Name of the event.
    pub event_name: String,
}

/// Builds `"{prefix}-{unix_millis}-{SUFFIX}"` where the suffix is nine
/// uppercase base-36 characters.
///
/// Not guaranteed unique; uniqueness per pair is enforced by the store.
#[must_use]
pub fn generate_certificate_number<R: Rng + ?Sized>(
    prefix: &str,
    issued_at: DateTime<Utc>,
    rng: &mut R,
) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .filter_map(|_| char::from_digit(rng.gen_range(0..36), 36))
        .map(|c| c.to_ascii_uppercase())
        .collect();
    format!("{prefix}-{}-{suffix}", issued_at.timestamp_millis())
}
