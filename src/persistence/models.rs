//! Database row models for events, attendees and certificates.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Attendee, AttendeeId, Certificate, CertificateId, Event, EventId,
};
use crate::error::GatewayError;

/// A row from the `events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Primary key.
    pub id: Uuid,
    /// Event name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Organizing body.
    pub organization: String,
    /// Calendar date.
    pub event_date: NaiveDate,
    /// Window start.
    pub start_time: NaiveTime,
    /// Window end.
    pub end_time: NaiveTime,
    /// Venue.
    pub location: String,
    /// Optional cap.
    pub max_attendees: Option<i32>,
    /// Status string (e.g. `"active"`).
    pub status: String,
    /// Creating principal.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = GatewayError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            organization: row.organization,
            event_date: row.event_date,
            start_time: row.start_time,
            end_time: row.end_time,
            location: row.location,
            max_attendees: row.max_attendees,
            status: row
                .status
                .parse()
                .map_err(|_| GatewayError::Store(format!("corrupt event status: {}", row.status)))?,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A row from the `attendees` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendeeRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning event.
    pub event_id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email.
    pub email: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Status string (e.g. `"checked_in"`).
    pub status: String,
    /// Latest check-in time.
    pub check_in_time: Option<DateTime<Utc>>,
    /// Certificate flag.
    pub certificate_issued: bool,
    /// Certificate issue time.
    pub certificate_issued_at: Option<DateTime<Utc>>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AttendeeRow> for Attendee {
    type Error = GatewayError;

    fn try_from(row: AttendeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AttendeeId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            status: row.status.parse().map_err(|_| {
                GatewayError::Store(format!("corrupt attendee status: {}", row.status))
            })?,
            check_in_time: row.check_in_time,
            certificate_issued: row.certificate_issued,
            certificate_issued_at: row.certificate_issued_at,
            created_at: row.created_at,
        })
    }
}

/// A row from the `certificates` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CertificateRow {
    /// Primary key.
    pub id: Uuid,
    /// Certified attendee.
    pub attendee_id: Uuid,
    /// Event.
    pub event_id: Uuid,
    /// Certificate number.
    pub certificate_number: String,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
}

impl From<CertificateRow> for Certificate {
    fn from(row: CertificateRow) -> Self {
        Self {
            id: CertificateId::from_uuid(row.id),
            attendee_id: AttendeeId::from_uuid(row.attendee_id),
            event_id: EventId::from_uuid(row.event_id),
            certificate_number: row.certificate_number,
            issued_at: row.issued_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn event_row(status: &str) -> EventRow {
        let (Some(date), Some(time)) = (
            NaiveDate::from_ymd_opt(2025, 3, 14),
            NaiveTime::from_hms_opt(9, 0, 0),
        ) else {
            panic!("valid schedule");
        };
        EventRow {
            id: Uuid::new_v4(),
            name: "Spring Workshop".to_string(),
            description: String::new(),
            organization: "VPAA".to_string(),
            event_date: date,
            start_time: time,
            end_time: time,
            location: String::new(),
            max_attendees: None,
            status: status.to_string(),
            created_by: "admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn event_row_converts() {
        let row = event_row("completed");
        let id = row.id;
        let Ok(event) = Event::try_from(row) else {
            panic!("row should convert");
        };
        assert_eq!(*event.id.as_uuid(), id);
        assert!(event.status.is_closed());
    }

    #[test]
    fn unknown_status_is_store_error() {
        assert!(matches!(
            Event::try_from(event_row("archived")),
            Err(GatewayError::Store(_))
        ));
    }
}
