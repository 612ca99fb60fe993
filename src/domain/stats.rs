//! Attendance statistics for dashboards.

use serde::Serialize;
use utoipa::ToSchema;

use super::{Attendee, Certificate, Event, EventId, EventStatus};

/// Per-event attendance counters.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    /// Event the counters belong to.
    pub event_id: EventId,
    /// Everyone registered, checked in or not.
    pub registered: usize,
    /// Attendees currently checked in.
    pub checked_in: usize,
    /// Certificates stored for the event.
    pub certificates_issued: usize,
    /// `checked_in / registered`, or 0 with no registrations.
    pub attendance_rate: f64,
}

impl EventStats {
    /// Tallies the given records of one event.
    #[must_use]
    pub fn tally(event_id: EventId, attendees: &[Attendee], certificates: &[Certificate]) -> Self {
        let registered = attendees.len();
        let checked_in = attendees.iter().filter(|a| a.is_checked_in()).count();
        Self {
            event_id,
            registered,
            checked_in,
            certificates_issued: certificates.len(),
            attendance_rate: ratio(checked_in, registered),
        }
    }
}

/// Counters across all events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    /// Number of events.
    pub total_events: usize,
    /// Events with status `active`.
    pub active_events: usize,
    /// Attendees across all events.
    pub total_attendees: usize,
    /// Checked-in attendees across all events.
    pub checked_in_attendees: usize,
    /// Certificates across all events.
    pub certificates_issued: usize,
}

impl OverviewStats {
    /// Tallies all records.
    #[must_use]
    pub fn tally(events: &[Event], attendees: &[Attendee], certificates: &[Certificate]) -> Self {
        Self {
            total_events: events.len(),
            active_events: events
                .iter()
                .filter(|e| e.status == EventStatus::Active)
                .count(),
            total_attendees: attendees.len(),
            checked_in_attendees: attendees.iter().filter(|a| a.is_checked_in()).count(),
            certificates_issued: certificates.len(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::NewAttendee;
    use chrono::Utc;

    fn attendee(event_id: EventId, checked_in: bool) -> Attendee {
        let input = NewAttendee {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            ..NewAttendee::default()
        };
        let Ok(mut a) = input.into_attendee(event_id, Utc::now()) else {
            panic!("valid attendee");
        };
        if checked_in {
            a.check_in(Utc::now());
        }
        a
    }

    #[test]
    fn empty_event_has_zero_rate() {
        let stats = EventStats::tally(EventId::new(), &[], &[]);
        assert_eq!(stats.registered, 0);
        assert!(stats.attendance_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn rate_is_checked_in_over_registered() {
        let id = EventId::new();
        let attendees = vec![
            attendee(id, true),
            attendee(id, false),
            attendee(id, true),
            attendee(id, false),
        ];
        let stats = EventStats::tally(id, &attendees, &[]);
        assert_eq!(stats.registered, 4);
        assert_eq!(stats.checked_in, 2);
        assert!((stats.attendance_rate - 0.5).abs() < f64::EPSILON);
    }
}
