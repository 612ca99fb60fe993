//! Attendance service: orchestrates the register → check-in → certify
//! workflow and emits events.

use std::sync::Arc;

use chrono::Utc;

use crate::config::GatewayConfig;
use crate::domain::certificate::DEFAULT_CERTIFICATE_PREFIX;
use crate::domain::certificate_svg::{artifact_filename, render_certificate_svg};
use crate::domain::{
    AttendanceEvent, Attendee, AttendeeId, AttendeeStatus, Certificate, CertificateId, Event,
    EventBus, EventId, EventPatch, EventStats, IssuedCertificate, NewAttendee, NewEvent,
    OverviewStats, SessionContext,
};
use crate::error::GatewayError;
use crate::persistence::AttendanceStore;

/// Knobs for certificate issuance.
#[derive(Debug, Clone)]
pub struct IssuancePolicy {
    /// Prefix of generated certificate numbers.
    pub certificate_prefix: String,
    /// Reject issuance for attendees that have not checked in.
    pub require_check_in: bool,
}

impl Default for IssuancePolicy {
    fn default() -> Self {
        Self {
            certificate_prefix: DEFAULT_CERTIFICATE_PREFIX.to_string(),
            require_check_in: false,
        }
    }
}

impl From<&GatewayConfig> for IssuancePolicy {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            certificate_prefix: config.certificate_prefix.clone(),
            require_check_in: config.require_check_in,
        }
    }
}

/// A rendered certificate ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateArtifact {
    /// Suggested download filename, derived from the certificate number.
    pub filename: String,
    /// SVG markup.
    pub svg: String,
}

/// Orchestration layer for all attendance operations.
///
/// Stateless coordinator: owns the injected [`AttendanceStore`] and the
/// [`EventBus`]. Every mutation follows the pattern: validate → call the
/// store → emit events → return result. Each store call is a separate
/// round trip; failures surface immediately and are never retried.
#[derive(Debug, Clone)]
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    event_bus: EventBus,
    policy: IssuancePolicy,
}

impl AttendanceService {
    /// Creates a new `AttendanceService`.
    #[must_use]
    pub fn new(store: Arc<dyn AttendanceStore>, event_bus: EventBus, policy: IssuancePolicy) -> Self {
        Self {
            store,
            event_bus,
            policy,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns the injected store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn AttendanceStore> {
        &self.store
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Creates an event. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Forbidden`] for non-admins,
    /// [`GatewayError::Validation`] for bad input, or a store error.
    pub async fn create_event(
        &self,
        ctx: &SessionContext,
        input: NewEvent,
    ) -> Result<Event, GatewayError> {
        ctx.require_admin()?;
        let event = input.into_event(&ctx.user_id, Utc::now())?;
        let event = self.store.insert_event(event).await?;

        let _ = self.event_bus.publish(AttendanceEvent::EventCreated {
            event_id: event.id,
            name: event.name.clone(),
            timestamp: event.created_at,
        });

        tracing::info!(event_id = %event.id, user = %ctx.user_id, "event created");
        Ok(event)
    }

    /// Fetches one event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if it does not exist.
    pub async fn get_event(
        &self,
        _ctx: &SessionContext,
        event_id: EventId,
    ) -> Result<Event, GatewayError> {
        self.load_event(event_id).await
    }

    /// Lists all events, most recent date first.
    ///
    /// # Errors
    ///
    /// Returns a store error on failure.
    pub async fn list_events(&self, _ctx: &SessionContext) -> Result<Vec<Event>, GatewayError> {
        self.store.list_events().await
    }

    /// Updates an event. Admin only.
    ///
    /// Once any attendee is checked in, only the status may change.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Forbidden`] for non-admins,
    /// [`GatewayError::EventNotFound`], [`GatewayError::Conflict`] when
    /// details of an event with checked-in attendees would change, or
    /// [`GatewayError::Validation`].
    pub async fn update_event(
        &self,
        ctx: &SessionContext,
        event_id: EventId,
        patch: EventPatch,
    ) -> Result<Event, GatewayError> {
        ctx.require_admin()?;
        let current = self.load_event(event_id).await?;

        if patch.touches_details() {
            let present = self
                .store
                .list_attendees(Some(event_id), Some(AttendeeStatus::CheckedIn))
                .await?;
            if !present.is_empty() {
                return Err(GatewayError::Conflict(
                    "Event details are locked once attendees have checked in".to_string(),
                ));
            }
        }

        let updated = patch.apply(&current, Utc::now())?;
        let updated = self.store.update_event(updated).await?;

        if updated.status != current.status {
            let _ = self.event_bus.publish(AttendanceEvent::EventStatusChanged {
                event_id,
                old_status: current.status,
                new_status: updated.status,
                timestamp: updated.updated_at,
            });
        }

        tracing::info!(%event_id, status = %updated.status, user = %ctx.user_id, "event updated");
        Ok(updated)
    }

    // ── Attendees ───────────────────────────────────────────────────────

    /// Registers an attendee for an event.
    ///
    /// Input is validated before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for missing names,
    /// [`GatewayError::EventNotFound`], or a store error.
    pub async fn register_attendee(
        &self,
        ctx: &SessionContext,
        event_id: EventId,
        input: NewAttendee,
    ) -> Result<Attendee, GatewayError> {
        let attendee = input.into_attendee(event_id, Utc::now())?;
        self.load_event(event_id).await?;
        let attendee = self.store.insert_attendee(attendee).await?;

        let _ = self.event_bus.publish(AttendanceEvent::AttendeeRegistered {
            event_id,
            attendee_id: attendee.id,
            attendee_name: attendee.full_name(),
            timestamp: attendee.created_at,
        });

        tracing::info!(%event_id, attendee_id = %attendee.id, user = %ctx.user_id, "attendee registered");
        Ok(attendee)
    }

    /// Checks an attendee in at the current time.
    ///
    /// Checking in twice refreshes the timestamp and keeps the status.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AttendeeNotFound`] or a store error.
    pub async fn check_in(
        &self,
        ctx: &SessionContext,
        attendee_id: AttendeeId,
    ) -> Result<Attendee, GatewayError> {
        let attendee = self.store.check_in_attendee(attendee_id, Utc::now()).await?;

        let _ = self.event_bus.publish(AttendanceEvent::AttendeeCheckedIn {
            event_id: attendee.event_id,
            attendee_id,
            attendee_name: attendee.full_name(),
            timestamp: attendee.check_in_time.unwrap_or_else(Utc::now),
        });

        tracing::info!(%attendee_id, event_id = %attendee.event_id, user = %ctx.user_id, "attendee checked in");
        Ok(attendee)
    }

    /// Fetches one attendee.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AttendeeNotFound`] if it does not exist.
    pub async fn get_attendee(
        &self,
        _ctx: &SessionContext,
        attendee_id: AttendeeId,
    ) -> Result<Attendee, GatewayError> {
        self.load_attendee(attendee_id).await
    }

    /// Lists an event's attendees, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] or a store error.
    pub async fn list_attendees(
        &self,
        _ctx: &SessionContext,
        event_id: EventId,
        status: Option<AttendeeStatus>,
    ) -> Result<Vec<Attendee>, GatewayError> {
        self.load_event(event_id).await?;
        self.store.list_attendees(Some(event_id), status).await
    }

    // ── Certificates ────────────────────────────────────────────────────

    /// Issues the certificate for `(attendee_id, event_id)`.
    ///
    /// Idempotent: a second call returns the stored certificate unchanged.
    /// A new certificate and the attendee's certified flag are written in
    /// one atomic store operation.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AttendeeNotFound`] or
    /// [`GatewayError::EventNotFound`] if either record is absent or the
    /// attendee is registered for a different event,
    /// [`GatewayError::Conflict`] when check-in is required but missing,
    /// or a store error.
    pub async fn issue_certificate(
        &self,
        ctx: &SessionContext,
        attendee_id: AttendeeId,
        event_id: EventId,
    ) -> Result<IssuedCertificate, GatewayError> {
        let attendee = self.load_attendee(attendee_id).await?;
        let event = self.load_event(event_id).await?;
        if attendee.event_id != event_id {
            return Err(GatewayError::AttendeeNotFound(attendee_id.to_string()));
        }

        if let Some(existing) = self.store.find_certificate(attendee_id, event_id).await? {
            tracing::debug!(%attendee_id, %event_id, "certificate already issued");
            return Ok(denormalize(existing, &attendee, &event));
        }

        if self.policy.require_check_in && !attendee.is_checked_in() {
            return Err(GatewayError::Conflict(
                "Attendee must be checked in before a certificate is issued".to_string(),
            ));
        }

        let candidate = Certificate::issue(
            attendee_id,
            event_id,
            &self.policy.certificate_prefix,
            Utc::now(),
            &mut rand::thread_rng(),
        );
        let outcome = self.store.issue_certificate(candidate).await?;

        if outcome.created {
            let cert = &outcome.certificate;
            let _ = self.event_bus.publish(AttendanceEvent::CertificateIssued {
                event_id,
                attendee_id,
                certificate_id: cert.id,
                certificate_number: cert.certificate_number.clone(),
                timestamp: cert.issued_at,
            });
            tracing::info!(
                %attendee_id,
                %event_id,
                certificate_number = %cert.certificate_number,
                user = %ctx.user_id,
                "certificate issued"
            );
        }

        Ok(denormalize(outcome.certificate, &attendee, &event))
    }

    /// Fetches one certificate with its names.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::CertificateNotFound`] or a store error.
    pub async fn get_certificate(
        &self,
        _ctx: &SessionContext,
        certificate_id: CertificateId,
    ) -> Result<IssuedCertificate, GatewayError> {
        let certificate = self
            .store
            .get_certificate(certificate_id)
            .await?
            .ok_or_else(|| GatewayError::CertificateNotFound(certificate_id.to_string()))?;
        let attendee = self.load_attendee(certificate.attendee_id).await?;
        let event = self.load_event(certificate.event_id).await?;
        Ok(denormalize(certificate, &attendee, &event))
    }

    /// Lists an event's certificates with their names, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] or a store error.
    pub async fn list_certificates(
        &self,
        _ctx: &SessionContext,
        event_id: EventId,
    ) -> Result<Vec<IssuedCertificate>, GatewayError> {
        let event = self.load_event(event_id).await?;
        let certificates = self.store.list_certificates(Some(event_id)).await?;
        let attendees = self.store.list_attendees(Some(event_id), None).await?;

        Ok(certificates
            .into_iter()
            .map(|certificate| {
                let holder = attendees.iter().find(|a| a.id == certificate.attendee_id);
                let attendee_name = match holder {
                    Some(attendee) => attendee.full_name(),
                    None => {
                        tracing::warn!(
                            certificate_id = %certificate.id,
                            attendee_id = %certificate.attendee_id,
                            %event_id,
                            "certificate holder is not on the event roster"
                        );
                        String::new()
                    }
                };
                IssuedCertificate {
                    certificate,
                    attendee_name,
                    event_name: event.name.clone(),
                }
            })
            .collect())
    }

    /// Renders a stored certificate as an SVG artifact.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::CertificateNotFound`] or a store error.
    pub async fn render_certificate(
        &self,
        ctx: &SessionContext,
        certificate_id: CertificateId,
    ) -> Result<CertificateArtifact, GatewayError> {
        let issued = self.get_certificate(ctx, certificate_id).await?;
        let number = &issued.certificate.certificate_number;
        Ok(CertificateArtifact {
            filename: artifact_filename(number),
            svg: render_certificate_svg(
                &issued.attendee_name,
                &issued.event_name,
                issued.certificate.issued_at.date_naive(),
                number,
            ),
        })
    }

    // ── Statistics ──────────────────────────────────────────────────────

    /// Attendance counters for one event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] or a store error.
    pub async fn event_stats(
        &self,
        _ctx: &SessionContext,
        event_id: EventId,
    ) -> Result<EventStats, GatewayError> {
        self.load_event(event_id).await?;
        let attendees = self.store.list_attendees(Some(event_id), None).await?;
        let certificates = self.store.list_certificates(Some(event_id)).await?;
        Ok(EventStats::tally(event_id, &attendees, &certificates))
    }

    /// Counters across all events.
    ///
    /// # Errors
    ///
    /// Returns a store error on failure.
    pub async fn overview_stats(&self, _ctx: &SessionContext) -> Result<OverviewStats, GatewayError> {
        let events = self.store.list_events().await?;
        let attendees = self.store.list_attendees(None, None).await?;
        let certificates = self.store.list_certificates(None).await?;
        Ok(OverviewStats::tally(&events, &attendees, &certificates))
    }

    async fn load_event(&self, event_id: EventId) -> Result<Event, GatewayError> {
        self.store
            .get_event(event_id)
            .await?
            .ok_or_else(|| GatewayError::EventNotFound(event_id.to_string()))
    }

    async fn load_attendee(&self, attendee_id: AttendeeId) -> Result<Attendee, GatewayError> {
        self.store
            .get_attendee(attendee_id)
            .await?
            .ok_or_else(|| GatewayError::AttendeeNotFound(attendee_id.to_string()))
    }
}

fn denormalize(certificate: Certificate, attendee: &Attendee, event: &Event) -> IssuedCertificate {
    IssuedCertificate {
        certificate,
        attendee_name: attendee.full_name(),
        event_name: event.name.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::persistence::MemoryStore;
    use chrono::{NaiveDate, NaiveTime};

    fn admin() -> SessionContext {
        SessionContext::new("admin-1", "admin@example.com", Role::Admin)
    }

    fn user() -> SessionContext {
        SessionContext::new("user-1", "user@example.com", Role::User)
    }

    fn make_service(policy: IssuancePolicy) -> AttendanceService {
        AttendanceService::new(Arc::new(MemoryStore::new()), EventBus::new(1000), policy)
    }

    fn new_event(name: &str) -> NewEvent {
        let (Some(date), Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(2025, 3, 14),
            NaiveTime::from_hms_opt(9, 0, 0),
            NaiveTime::from_hms_opt(17, 0, 0),
        ) else {
            panic!("valid schedule");
        };
        NewEvent {
            name: name.to_string(),
            description: String::new(),
            organization: None,
            event_date: date,
            start_time: start,
            end_time: end,
            location: "Hall A".to_string(),
            max_attendees: None,
            status: None,
        }
    }

    fn jane() -> NewAttendee {
        NewAttendee {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: None,
        }
    }

    async fn seeded(service: &AttendanceService) -> (Event, Attendee) {
        let Ok(event) = service.create_event(&admin(), new_event("Spring Workshop")).await else {
            panic!("event creation failed");
        };
        let Ok(attendee) = service.register_attendee(&user(), event.id, jane()).await else {
            panic!("registration failed");
        };
        (event, attendee)
    }

    #[tokio::test]
    async fn create_event_requires_admin() {
        let service = make_service(IssuancePolicy::default());
        let result = service.create_event(&user(), new_event("X")).await;
        assert!(matches!(result, Err(GatewayError::Forbidden(_))));
    }

    #[tokio::test]
    async fn create_event_emits_event() {
        let service = make_service(IssuancePolicy::default());
        let mut rx = service.event_bus().subscribe();

        let Ok(event) = service.create_event(&admin(), new_event("Spring Workshop")).await else {
            panic!("event creation failed");
        };

        let Ok(emitted) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(emitted.event_type_str(), "event_created");
        assert_eq!(emitted.event_id(), event.id);
    }

    #[tokio::test]
    async fn registration_with_missing_name_writes_nothing() {
        let service = make_service(IssuancePolicy::default());
        let (event, _) = seeded(&service).await;

        let bad = NewAttendee {
            first_name: "Solo".to_string(),
            ..NewAttendee::default()
        };
        let result = service.register_attendee(&user(), event.id, bad).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));

        let Ok(attendees) = service.list_attendees(&user(), event.id, None).await else {
            panic!("list failed");
        };
        assert_eq!(attendees.len(), 1);
    }

    #[tokio::test]
    async fn registration_for_unknown_event_fails() {
        let service = make_service(IssuancePolicy::default());
        let result = service.register_attendee(&user(), EventId::new(), jane()).await;
        assert!(matches!(result, Err(GatewayError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn check_in_is_effect_idempotent() {
        let service = make_service(IssuancePolicy::default());
        let (_, attendee) = seeded(&service).await;

        let Ok(first) = service.check_in(&user(), attendee.id).await else {
            panic!("check-in failed");
        };
        let Ok(second) = service.check_in(&user(), attendee.id).await else {
            panic!("check-in failed");
        };
        assert_eq!(first.status, AttendeeStatus::CheckedIn);
        assert_eq!(second.status, AttendeeStatus::CheckedIn);
        assert!(second.check_in_time >= first.check_in_time);
    }

    #[tokio::test]
    async fn issuance_is_sequentially_idempotent() {
        let service = make_service(IssuancePolicy::default());
        let (event, attendee) = seeded(&service).await;
        let _ = service.check_in(&user(), attendee.id).await;

        let Ok(first) = service.issue_certificate(&user(), attendee.id, event.id).await else {
            panic!("issuance failed");
        };
        let Ok(second) = service.issue_certificate(&user(), attendee.id, event.id).await else {
            panic!("issuance failed");
        };

        assert_eq!(
            first.certificate.certificate_number,
            second.certificate.certificate_number
        );
        assert_eq!(first.attendee_name, "Jane Doe");
        assert_eq!(second.event_name, "Spring Workshop");

        let Ok(all) = service.list_certificates(&user(), event.id).await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 1);

        let Ok(Some(stored)) = service.store().get_attendee(attendee.id).await else {
            panic!("attendee missing");
        };
        assert!(stored.certificate_issued);
        assert!(stored.certificate_issued_at.is_some());
    }

    #[tokio::test]
    async fn concurrent_issuance_stores_one_certificate() {
        let service = make_service(IssuancePolicy::default());
        let (event, attendee) = seeded(&service).await;
        let _ = service.check_in(&user(), attendee.id).await;

        let mut handles = Vec::new();
        for _ in 0..16 {
            let svc = service.clone();
            let (a, e) = (attendee.id, event.id);
            handles.push(tokio::spawn(async move {
                svc.issue_certificate(&user(), a, e).await
            }));
        }

        let mut numbers = Vec::new();
        for handle in handles {
            let Ok(Ok(issued)) = handle.await else {
                panic!("issuance task failed");
            };
            numbers.push(issued.certificate.certificate_number);
        }
        numbers.dedup();
        assert_eq!(numbers.len(), 1);

        let Ok(all) = service.list_certificates(&user(), event.id).await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn issuance_for_unknown_records_is_not_found() {
        let service = make_service(IssuancePolicy::default());
        let (event, attendee) = seeded(&service).await;

        let missing_attendee = service
            .issue_certificate(&user(), AttendeeId::new(), event.id)
            .await;
        assert!(matches!(missing_attendee, Err(GatewayError::AttendeeNotFound(_))));

        let missing_event = service
            .issue_certificate(&user(), attendee.id, EventId::new())
            .await;
        assert!(matches!(missing_event, Err(GatewayError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn issuance_for_another_events_attendee_is_refused() {
        let service = make_service(IssuancePolicy::default());
        let (_, attendee) = seeded(&service).await;
        let Ok(other) = service.create_event(&admin(), new_event("Autumn Summit")).await else {
            panic!("event creation failed");
        };

        let result = service.issue_certificate(&user(), attendee.id, other.id).await;
        assert!(matches!(result, Err(GatewayError::AttendeeNotFound(_))));

        let Ok(certificates) = service.list_certificates(&user(), other.id).await else {
            panic!("list failed");
        };
        assert!(certificates.is_empty());
        let Ok(Some(stored)) = service.store().get_attendee(attendee.id).await else {
            panic!("attendee missing");
        };
        assert!(!stored.certificate_issued);
    }

    #[tokio::test]
    async fn strict_policy_requires_check_in() {
        let service = make_service(IssuancePolicy {
            require_check_in: true,
            ..IssuancePolicy::default()
        });
        let (event, attendee) = seeded(&service).await;

        let refused = service.issue_certificate(&user(), attendee.id, event.id).await;
        assert!(matches!(refused, Err(GatewayError::Conflict(_))));

        let _ = service.check_in(&user(), attendee.id).await;
        assert!(service.issue_certificate(&user(), attendee.id, event.id).await.is_ok());
    }

    #[tokio::test]
    async fn replay_does_not_emit_second_event() {
        let service = make_service(IssuancePolicy::default());
        let (event, attendee) = seeded(&service).await;
        let mut rx = service.event_bus().subscribe();

        let _ = service.issue_certificate(&user(), attendee.id, event.id).await;
        let _ = service.issue_certificate(&user(), attendee.id, event.id).await;

        let Ok(first) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(first.event_type_str(), "certificate_issued");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn details_lock_after_check_in() {
        let service = make_service(IssuancePolicy::default());
        let (event, attendee) = seeded(&service).await;
        let _ = service.check_in(&user(), attendee.id).await;

        let rename = EventPatch {
            name: Some("Renamed".to_string()),
            ..EventPatch::default()
        };
        let refused = service.update_event(&admin(), event.id, rename).await;
        assert!(matches!(refused, Err(GatewayError::Conflict(_))));

        let close = EventPatch {
            status: Some(crate::domain::EventStatus::Completed),
            ..EventPatch::default()
        };
        let Ok(closed) = service.update_event(&admin(), event.id, close).await else {
            panic!("status change should be allowed");
        };
        assert!(closed.status.is_closed());
        assert_eq!(closed.name, "Spring Workshop");
    }

    #[tokio::test]
    async fn render_uses_stored_names() {
        let service = make_service(IssuancePolicy::default());
        let (event, attendee) = seeded(&service).await;
        let Ok(issued) = service.issue_certificate(&user(), attendee.id, event.id).await else {
            panic!("issuance failed");
        };

        let Ok(artifact) = service.render_certificate(&user(), issued.certificate.id).await else {
            panic!("render failed");
        };
        assert!(artifact.svg.contains("Jane Doe"));
        assert!(artifact.svg.contains("Spring Workshop"));
        assert!(artifact.svg.contains(&issued.certificate.certificate_number));
        assert_eq!(
            artifact.filename,
            format!("{}.svg", issued.certificate.certificate_number)
        );
    }

    #[tokio::test]
    async fn stats_count_workflow_progress() {
        let service = make_service(IssuancePolicy::default());
        let (event, attendee) = seeded(&service).await;
        let _ = service
            .register_attendee(
                &user(),
                event.id,
                NewAttendee {
                    first_name: "John".to_string(),
                    last_name: "Roe".to_string(),
                    ..NewAttendee::default()
                },
            )
            .await;
        let _ = service.check_in(&user(), attendee.id).await;
        let _ = service.issue_certificate(&user(), attendee.id, event.id).await;

        let Ok(stats) = service.event_stats(&user(), event.id).await else {
            panic!("stats failed");
        };
        assert_eq!(stats.registered, 2);
        assert_eq!(stats.checked_in, 1);
        assert_eq!(stats.certificates_issued, 1);

        let Ok(overview) = service.overview_stats(&user()).await else {
            panic!("overview failed");
        };
        assert_eq!(overview.total_events, 1);
        assert_eq!(overview.active_events, 1);
        assert_eq!(overview.total_attendees, 2);
    }
}
