//! PostgreSQL implementation of the storage port.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{AttendeeRow, CertificateRow, EventRow};
use super::{AttendanceStore, StoreFuture};
use crate::config::GatewayConfig;
use crate::domain::{
    Attendee, AttendeeId, AttendeeStatus, Certificate, CertificateId, Event, EventId,
    IssueOutcome,
};
use crate::error::GatewayError;

const EVENT_COLUMNS: &str = "id, name, description, organization, event_date, start_time, \
     end_time, location, max_attendees, status, created_by, created_at, updated_at";

const ATTENDEE_COLUMNS: &str = "id, event_id, first_name, last_name, email, phone, status, \
     check_in_time, certificate_issued, certificate_issued_at, created_at";

const CERTIFICATE_COLUMNS: &str = "id, attendee_id, event_id, certificate_number, issued_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Certificate uniqueness per pair is backed by a `UNIQUE (attendee_id,
/// event_id)` constraint; issuance inserts with `ON CONFLICT DO NOTHING`
/// inside a transaction that also flags the attendee.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from the gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Store`] if the database is unreachable.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the bundled schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Store`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), GatewayError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

impl AttendanceStore for PostgresStore {
    fn insert_event(&self, event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, EventRow>(&format!(
                "INSERT INTO events ({EVENT_COLUMNS}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
                 RETURNING {EVENT_COLUMNS}"
            ))
            .bind(event.id.as_uuid())
            .bind(&event.name)
            .bind(&event.description)
            .bind(&event.organization)
            .bind(event.event_date)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(&event.location)
            .bind(event.max_attendees)
            .bind(event.status.as_str())
            .bind(&event.created_by)
            .bind(event.created_at)
            .bind(event.updated_at)
            .fetch_one(&self.pool)
            .await?;
            Event::try_from(row)
        })
    }

    fn get_event(&self, id: EventId) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move {
            sqlx::query_as::<_, EventRow>(&format!(
                "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
            ))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .map(Event::try_from)
            .transpose()
        })
    }

    fn list_events(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            sqlx::query_as::<_, EventRow>(&format!(
                "SELECT {EVENT_COLUMNS} FROM events ORDER BY event_date DESC, created_at DESC"
            ))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Event::try_from)
            .collect()
        })
    }

    fn update_event(&self, event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, EventRow>(&format!(
                "UPDATE events SET name = $2, description = $3, event_date = $4, \
                 start_time = $5, end_time = $6, location = $7, max_attendees = $8, \
                 status = $9, updated_at = $10 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
            ))
            .bind(event.id.as_uuid())
            .bind(&event.name)
            .bind(&event.description)
            .bind(event.event_date)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(&event.location)
            .bind(event.max_attendees)
            .bind(event.status.as_str())
            .bind(event.updated_at)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| GatewayError::EventNotFound(event.id.to_string()))?;
            Event::try_from(row)
        })
    }

    fn insert_attendee(&self, attendee: Attendee) -> StoreFuture<'_, Attendee> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, AttendeeRow>(&format!(
                "INSERT INTO attendees ({ATTENDEE_COLUMNS}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
                 RETURNING {ATTENDEE_COLUMNS}"
            ))
            .bind(attendee.id.as_uuid())
            .bind(attendee.event_id.as_uuid())
            .bind(&attendee.first_name)
            .bind(&attendee.last_name)
            .bind(&attendee.email)
            .bind(&attendee.phone)
            .bind(attendee.status.as_str())
            .bind(attendee.check_in_time)
            .bind(attendee.certificate_issued)
            .bind(attendee.certificate_issued_at)
            .bind(attendee.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let missing_event = matches!(
                    &e,
                    sqlx::Error::Database(db) if db.is_foreign_key_violation()
                );
                if missing_event {
                    GatewayError::EventNotFound(attendee.event_id.to_string())
                } else {
                    GatewayError::from(e)
                }
            })?;
            Attendee::try_from(row)
        })
    }

    fn get_attendee(&self, id: AttendeeId) -> StoreFuture<'_, Option<Attendee>> {
        Box::pin(async move {
            sqlx::query_as::<_, AttendeeRow>(&format!(
                "SELECT {ATTENDEE_COLUMNS} FROM attendees WHERE id = $1"
            ))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .map(Attendee::try_from)
            .transpose()
        })
    }

    fn list_attendees(
        &self,
        event_id: Option<EventId>,
        status: Option<AttendeeStatus>,
    ) -> StoreFuture<'_, Vec<Attendee>> {
        Box::pin(async move {
            sqlx::query_as::<_, AttendeeRow>(&format!(
                "SELECT {ATTENDEE_COLUMNS} FROM attendees \
                 WHERE ($1::uuid IS NULL OR event_id = $1) \
                   AND ($2::text IS NULL OR status = $2) \
                 ORDER BY first_name, last_name, created_at"
            ))
            .bind(event_id.map(uuid::Uuid::from))
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Attendee::try_from)
            .collect()
        })
    }

    fn check_in_attendee(
        &self,
        id: AttendeeId,
        at: DateTime<Utc>,
    ) -> StoreFuture<'_, Attendee> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, AttendeeRow>(&format!(
                "UPDATE attendees SET status = $2, check_in_time = $3 \
                 WHERE id = $1 RETURNING {ATTENDEE_COLUMNS}"
            ))
            .bind(id.as_uuid())
            .bind(AttendeeStatus::CheckedIn.as_str())
            .bind(at)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| GatewayError::AttendeeNotFound(id.to_string()))?;
            Attendee::try_from(row)
        })
    }

    fn issue_certificate(&self, certificate: Certificate) -> StoreFuture<'_, IssueOutcome> {
        Box::pin(async move {
            let mut tx = self.pool.begin().await?;

            let inserted = sqlx::query_as::<_, CertificateRow>(&format!(
                "INSERT INTO certificates ({CERTIFICATE_COLUMNS}) VALUES ($1, $2, $3, $4, $5) \
                 ON CONFLICT (attendee_id, event_id) DO NOTHING \
                 RETURNING {CERTIFICATE_COLUMNS}"
            ))
            .bind(certificate.id.as_uuid())
            .bind(certificate.attendee_id.as_uuid())
            .bind(certificate.event_id.as_uuid())
            .bind(&certificate.certificate_number)
            .bind(certificate.issued_at)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(row) = inserted else {
                tx.rollback().await?;
                let existing = sqlx::query_as::<_, CertificateRow>(&format!(
                    "SELECT {CERTIFICATE_COLUMNS} FROM certificates \
                     WHERE attendee_id = $1 AND event_id = $2"
                ))
                .bind(certificate.attendee_id.as_uuid())
                .bind(certificate.event_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;
                return Ok(IssueOutcome {
                    certificate: existing.into(),
                    created: false,
                });
            };

            let updated = sqlx::query(
                "UPDATE attendees SET certificate_issued = TRUE, certificate_issued_at = $2 \
                 WHERE id = $1",
            )
            .bind(certificate.attendee_id.as_uuid())
            .bind(certificate.issued_at)
            .execute(&mut *tx)
            .await?;
            if updated.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(GatewayError::AttendeeNotFound(
                    certificate.attendee_id.to_string(),
                ));
            }

            tx.commit().await?;
            Ok(IssueOutcome {
                certificate: row.into(),
                created: true,
            })
        })
    }

    fn find_certificate(
        &self,
        attendee_id: AttendeeId,
        event_id: EventId,
    ) -> StoreFuture<'_, Option<Certificate>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, CertificateRow>(&format!(
                "SELECT {CERTIFICATE_COLUMNS} FROM certificates \
                 WHERE attendee_id = $1 AND event_id = $2"
            ))
            .bind(attendee_id.as_uuid())
            .bind(event_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
            Ok(row.map(Certificate::from))
        })
    }

    fn get_certificate(&self, id: CertificateId) -> StoreFuture<'_, Option<Certificate>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, CertificateRow>(&format!(
                "SELECT {CERTIFICATE_COLUMNS} FROM certificates WHERE id = $1"
            ))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
            Ok(row.map(Certificate::from))
        })
    }

    fn list_certificates(
        &self,
        event_id: Option<EventId>,
    ) -> StoreFuture<'_, Vec<Certificate>> {
        Box::pin(async move {
            let rows = sqlx::query_as::<_, CertificateRow>(&format!(
                "SELECT {CERTIFICATE_COLUMNS} FROM certificates \
                 WHERE ($1::uuid IS NULL OR event_id = $1) ORDER BY issued_at DESC"
            ))
            .bind(event_id.map(uuid::Uuid::from))
            .fetch_all(&self.pool)
            .await?;
            Ok(rows.into_iter().map(Certificate::from).collect())
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(&self.pool)
                .await?;
            Ok(())
        })
    }
}
