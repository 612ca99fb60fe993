//! In-process store backed by hash maps.
//!
//! [`MemoryStore`] keeps every table behind a single
//! [`tokio::sync::RwLock`], so compound operations such as certificate
//! issuance run under one write guard.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{AttendanceStore, StoreFuture};
use crate::domain::{
    Attendee, AttendeeId, AttendeeStatus, Certificate, CertificateId, Event, EventId,
    IssueOutcome,
};
use crate::error::GatewayError;

#[derive(Debug, Default)]
struct Tables {
    events: HashMap<EventId, Event>,
    attendees: HashMap<AttendeeId, Attendee>,
    certificates: HashMap<CertificateId, Certificate>,
    certificate_by_pair: HashMap<(AttendeeId, EventId), CertificateId>,
}

/// Store holding all records in memory.
///
/// # Concurrency
///
/// - Reads run concurrently.
/// - Writes are serialized, which makes insert-if-absent atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttendanceStore for MemoryStore {
    fn insert_event(&self, event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            if tables.events.contains_key(&event.id) {
                return Err(GatewayError::Store(format!(
                    "event {} already exists",
                    event.id
                )));
            }
            tables.events.insert(event.id, event.clone());
            Ok(event)
        })
    }

    fn get_event(&self, id: EventId) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move { Ok(self.tables.read().await.events.get(&id).cloned()) })
    }

    fn list_events(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            let mut events: Vec<Event> = tables.events.values().cloned().collect();
            events.sort_by(|a, b| {
                b.event_date
                    .cmp(&a.event_date)
                    .then_with(|| b.created_at.cmp(&a.created_at))
            });
            Ok(events)
        })
    }

    fn update_event(&self, event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let slot = tables
                .events
                .get_mut(&event.id)
                .ok_or_else(|| GatewayError::EventNotFound(event.id.to_string()))?;
            *slot = event.clone();
            Ok(event)
        })
    }

    fn insert_attendee(&self, attendee: Attendee) -> StoreFuture<'_, Attendee> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            if !tables.events.contains_key(&attendee.event_id) {
                return Err(GatewayError::EventNotFound(attendee.event_id.to_string()));
            }
            tables.attendees.insert(attendee.id, attendee.clone());
            Ok(attendee)
        })
    }

    fn get_attendee(&self, id: AttendeeId) -> StoreFuture<'_, Option<Attendee>> {
        Box::pin(async move { Ok(self.tables.read().await.attendees.get(&id).cloned()) })
    }

    fn list_attendees(
        &self,
        event_id: Option<EventId>,
        status: Option<AttendeeStatus>,
    ) -> StoreFuture<'_, Vec<Attendee>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            let mut attendees: Vec<Attendee> = tables
                .attendees
                .values()
                .filter(|a| event_id.is_none_or(|id| a.event_id == id))
                .filter(|a| status.is_none_or(|s| a.status == s))
                .cloned()
                .collect();
            attendees.sort_by(|a, b| {
                a.first_name
                    .cmp(&b.first_name)
                    .then_with(|| a.last_name.cmp(&b.last_name))
                    .then_with(|| a.created_at.cmp(&b.created_at))
            });
            Ok(attendees)
        })
    }

    fn check_in_attendee(
        &self,
        id: AttendeeId,
        at: DateTime<Utc>,
    ) -> StoreFuture<'_, Attendee> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let attendee = tables
                .attendees
                .get_mut(&id)
                .ok_or_else(|| GatewayError::AttendeeNotFound(id.to_string()))?;
            attendee.check_in(at);
            Ok(attendee.clone())
        })
    }

    fn issue_certificate(&self, certificate: Certificate) -> StoreFuture<'_, IssueOutcome> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let pair = (certificate.attendee_id, certificate.event_id);

            if let Some(existing) = tables
                .certificate_by_pair
                .get(&pair)
                .and_then(|id| tables.certificates.get(id))
            {
                return Ok(IssueOutcome {
                    certificate: existing.clone(),
                    created: false,
                });
            }

            let attendee = tables
                .attendees
                .get_mut(&certificate.attendee_id)
                .ok_or_else(|| GatewayError::AttendeeNotFound(certificate.attendee_id.to_string()))?;
            attendee.mark_certified(certificate.issued_at);

            tables.certificate_by_pair.insert(pair, certificate.id);
            tables.certificates.insert(certificate.id, certificate.clone());
            Ok(IssueOutcome {
                certificate,
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
            let tables = self.tables.read().await;
            Ok(tables
                .certificate_by_pair
                .get(&(attendee_id, event_id))
                .and_then(|id| tables.certificates.get(id))
                .cloned())
        })
    }

    fn get_certificate(&self, id: CertificateId) -> StoreFuture<'_, Option<Certificate>> {
        Box::pin(async move { Ok(self.tables.read().await.certificates.get(&id).cloned()) })
    }

    fn list_certificates(
        &self,
        event_id: Option<EventId>,
    ) -> StoreFuture<'_, Vec<Certificate>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            let mut certificates: Vec<Certificate> = tables
                .certificates
                .values()
                .filter(|c| event_id.is_none_or(|id| c.event_id == id))
                .cloned()
                .collect();
            certificates.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
            Ok(certificates)
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{NewAttendee, NewEvent};
    use chrono::{NaiveDate, NaiveTime};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn make_event() -> Event {
        let (Some(date), Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(2025, 3, 14),
            NaiveTime::from_hms_opt(9, 0, 0),
            NaiveTime::from_hms_opt(17, 0, 0),
        ) else {
            panic!("valid schedule");
        };
        let input = NewEvent {
            name: "Spring Workshop".to_string(),
            description: String::new(),
            organization: None,
            event_date: date,
            start_time: start,
            end_time: end,
            location: "Hall A".to_string(),
            max_attendees: None,
            status: None,
        };
        let Ok(event) = input.into_event("admin", Utc::now()) else {
            panic!("valid event");
        };
        event
    }

    fn make_attendee(event_id: EventId, first: &str) -> Attendee {
        let input = NewAttendee {
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            ..NewAttendee::default()
        };
        let Ok(attendee) = input.into_attendee(event_id, Utc::now()) else {
            panic!("valid attendee");
        };
        attendee
    }

    async fn seeded() -> (MemoryStore, Event, Attendee) {
        let store = MemoryStore::new();
        let Ok(event) = store.insert_event(make_event()).await else {
            panic!("insert event failed");
        };
        let Ok(attendee) = store.insert_attendee(make_attendee(event.id, "Jane")).await else {
            panic!("insert attendee failed");
        };
        (store, event, attendee)
    }

    #[tokio::test]
    async fn insert_and_get_event() {
        let store = MemoryStore::new();
        let event = make_event();
        let id = event.id;
        assert!(store.insert_event(event).await.is_ok());

        let Ok(Some(fetched)) = store.get_event(id).await else {
            panic!("event should exist");
        };
        assert_eq!(fetched.id, id);
        assert!(matches!(store.get_event(EventId::new()).await, Ok(None)));
    }

    #[tokio::test]
    async fn attendee_requires_existing_event() {
        let store = MemoryStore::new();
        let result = store.insert_attendee(make_attendee(EventId::new(), "Jane")).await;
        assert!(matches!(result, Err(GatewayError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn list_attendees_filters_and_sorts() {
        let (store, event, jane) = seeded().await;
        let _ = store.insert_attendee(make_attendee(event.id, "Adam")).await;
        let _ = store.check_in_attendee(jane.id, Utc::now()).await;

        let Ok(all) = store.list_attendees(Some(event.id), None).await else {
            panic!("list failed");
        };
        let names: Vec<&str> = all.iter().map(|a| a.first_name.as_str()).collect();
        assert_eq!(names, vec!["Adam", "Jane"]);

        let Ok(present) = store
            .list_attendees(Some(event.id), Some(AttendeeStatus::CheckedIn))
            .await
        else {
            panic!("list failed");
        };
        assert_eq!(present.len(), 1);

        let Ok(other) = store.list_attendees(Some(EventId::new()), None).await else {
            panic!("list failed");
        };
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn check_in_unknown_attendee_fails() {
        let store = MemoryStore::new();
        let result = store.check_in_attendee(AttendeeId::new(), Utc::now()).await;
        assert!(matches!(result, Err(GatewayError::AttendeeNotFound(_))));
    }

    #[tokio::test]
    async fn issue_is_insert_if_absent() {
        let (store, event, attendee) = seeded().await;
        let mut rng = StdRng::seed_from_u64(11);

        let first = Certificate::issue(attendee.id, event.id, "VPAA", Utc::now(), &mut rng);
        let Ok(outcome) = store.issue_certificate(first.clone()).await else {
            panic!("issue failed");
        };
        assert!(outcome.created);

        let second = Certificate::issue(attendee.id, event.id, "VPAA", Utc::now(), &mut rng);
        let Ok(replay) = store.issue_certificate(second).await else {
            panic!("issue failed");
        };
        assert!(!replay.created);
        assert_eq!(replay.certificate, first);

        let Ok(all) = store.list_certificates(Some(event.id)).await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 1);

        let Ok(Some(flagged)) = store.get_attendee(attendee.id).await else {
            panic!("attendee should exist");
        };
        assert!(flagged.certificate_issued);
        assert_eq!(flagged.certificate_issued_at, Some(first.issued_at));
    }

    #[tokio::test]
    async fn issue_for_unknown_attendee_stores_nothing() {
        let (store, event, _) = seeded().await;
        let cert = Certificate::issue(
            AttendeeId::new(),
            event.id,
            "VPAA",
            Utc::now(),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(store.issue_certificate(cert).await.is_err());
        let Ok(all) = store.list_certificates(None).await else {
            panic!("list failed");
        };
        assert!(all.is_empty());
    }
}
