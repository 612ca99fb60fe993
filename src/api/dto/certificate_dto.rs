//! Certificate DTOs for issuance, lookup, listing, and preview.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AttendeeId, CertificateId, EventId, IssuedCertificate};

/// Request body for `POST /certificates/generate`.
///
/// Both fields are optional at the wire level; absence or emptiness is
/// reported as a validation error by the handler.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCertificateRequest {
    /// Attendee to certify.
    #[serde(default)]
    pub attendee_id: Option<String>,
    /// Event attended.
    #[serde(default)]
    pub event_id: Option<String>,
}

/// Certificate with denormalized attendee and event names.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDto {
    /// Certificate identifier.
    pub id: CertificateId,
    /// Certified attendee.
    pub attendee_id: AttendeeId,
    /// Event attended.
    pub event_id: EventId,
    /// Human-readable certificate number.
    pub certificate_number: String,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
    /// `"{first} {last}"` of the attendee.
    pub attendee_name: String,
    /// Event name.
    pub event_name: String,
}

impl From<IssuedCertificate> for CertificateDto {
    fn from(issued: IssuedCertificate) -> Self {
        let cert = issued.certificate;
        Self {
            id: cert.id,
            attendee_id: cert.attendee_id,
            event_id: cert.event_id,
            certificate_number: cert.certificate_number,
            issued_at: cert.issued_at,
            attendee_name: issued.attendee_name,
            event_name: issued.event_name,
        }
    }
}

/// Response body wrapping a single certificate.
#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateResponse {
    /// The certificate.
    pub certificate: CertificateDto,
}

/// List response for `GET /events/:id/certificates`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateListResponse {
    /// Certificates, most recently issued first.
    pub data: Vec<CertificateDto>,
}

/// Query parameters for `GET /certificates/:id/svg`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SvgQuery {
    /// Serve for inline display instead of as a download.
    #[serde(default)]
    pub inline: bool,
}

/// Request body for `POST /certificates/preview`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCertificateRequest {
    /// Name printed as the recipient.
    pub attendee_name: String,
    /// Event name.
    pub event_name: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD` date.
    pub issue_date: String,
    /// Certificate number printed on the artifact.
    pub certificate_number: String,
}
