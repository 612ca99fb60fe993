//! Event DTOs for create, update, get, and list operations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{Event, EventId, EventPatch, EventStatus, NewEvent};

/// Request body for `POST /events`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Event name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Organizing body. Defaults to `VPAA`.
    #[serde(default)]
    pub organization: Option<String>,
    /// Calendar date (`YYYY-MM-DD`).
    pub event_date: NaiveDate,
    /// Start time (`HH:MM:SS`).
    pub start_time: NaiveTime,
    /// End time (`HH:MM:SS`).
    pub end_time: NaiveTime,
    /// Venue.
    #[serde(default)]
    pub location: String,
    /// Optional attendee cap.
    #[serde(default)]
    pub max_attendees: Option<i32>,
    /// Initial status. Defaults to `active`.
    #[serde(default)]
    pub status: Option<EventStatus>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            organization: req.organization,
            event_date: req.event_date,
            start_time: req.start_time,
            end_time: req.end_time,
            location: req.location,
            max_attendees: req.max_attendees,
            status: req.status,
        }
    }
}

/// Request body for `PATCH /events/:id`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New date.
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    /// New start time.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// New end time.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// New venue.
    #[serde(default)]
    pub location: Option<String>,
    /// New cap. An explicit `null` removes the cap.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub max_attendees: Option<Option<i32>>,
    /// New status.
    #[serde(default)]
    pub status: Option<EventStatus>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field
/// (`None`, via `#[serde(default)]`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateEventRequest> for EventPatch {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            event_date: req.event_date,
            start_time: req.start_time,
            end_time: req.end_time,
            location: req.location,
            max_attendees: req.max_attendees,
            status: req.status,
        }
    }
}

/// Event representation returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    /// Event identifier.
    pub id: EventId,
    /// Name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Organizing body.
    pub organization: String,
    /// Calendar date.
    pub event_date: NaiveDate,
    /// Start time.
    pub start_time: NaiveTime,
    /// End time.
    pub end_time: NaiveTime,
    /// Venue.
    pub location: String,
    /// Optional cap.
    pub max_attendees: Option<i32>,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Creating principal.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            organization: event.organization,
            event_date: event.event_date,
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location,
            max_attendees: event.max_attendees,
            status: event.status,
            created_by: event.created_by,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Paginated list response for `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Events on this page, most recent date first.
    pub data: Vec<EventDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn patch(body: &str) -> EventPatch {
        let Ok(req) = serde_json::from_str::<UpdateEventRequest>(body) else {
            panic!("update request should parse: {body}");
        };
        req.into()
    }

    #[test]
    fn null_capacity_clears_and_absent_capacity_keeps() {
        assert_eq!(patch(r#"{"maxAttendees": null}"#).max_attendees, Some(None));
        assert_eq!(patch(r#"{"maxAttendees": 80}"#).max_attendees, Some(Some(80)));
        assert_eq!(patch(r#"{"name": "Renamed"}"#).max_attendees, None);
    }
}
