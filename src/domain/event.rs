//! Events organised by an admin and attended by registered attendees.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EventId;
use crate::error::GatewayError;

/// Organization stamped on events when none is given.
pub const DEFAULT_ORGANIZATION: &str = "VPAA";

/// Lifecycle status of an event.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Not yet open for registration.
    Draft,
    /// Open; attendees may register and check in.
    #[default]
    Active,
    /// Finished.
    Completed,
    /// Called off.
    Cancelled,
}

impl EventStatus {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` for statuses that close the event.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(GatewayError::Validation(format!(
                "invalid event status: {other}"
            ))),
        }
    }
}

/// A scheduled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// Display name, embedded in certificates.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Organizing body.
    pub organization: String,
    /// Calendar date of the event.
    pub event_date: NaiveDate,
    /// Start of the scheduled window.
    pub start_time: NaiveTime,
    /// End of the scheduled window.
    pub end_time: NaiveTime,
    /// Venue.
    pub location: String,
    /// Optional registration cap.
    pub max_attendees: Option<i32>,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Principal that created the event.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating an [`Event`].
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Display name (required).
    pub name: String,
    /// Description.
    pub description: String,
    /// Organizing body; defaults to [`DEFAULT_ORGANIZATION`].
    pub organization: Option<String>,
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
    /// Initial status; defaults to active.
    pub status: Option<EventStatus>,
}

impl NewEvent {
    /// Checks the field constraints and builds the stored [`Event`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] when the name is blank, the
    /// window ends before it starts, or the capacity is not positive.
    pub fn into_event(self, created_by: &str, now: DateTime<Utc>) -> Result<Event, GatewayError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(GatewayError::Validation("Event name is required".to_string()));
        }
        check_window(self.start_time, self.end_time)?;
        check_capacity(self.max_attendees)?;

        let organization = self
            .organization
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| DEFAULT_ORGANIZATION.to_string());

        Ok(Event {
            id: EventId::new(),
            name,
            description: self.description.trim().to_string(),
            organization,
            event_date: self.event_date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location.trim().to_string(),
            max_attendees: self.max_attendees,
            status: self.status.unwrap_or_default(),
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update of an [`Event`]. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub event_date: Option<NaiveDate>,
    /// New start time.
    pub start_time: Option<NaiveTime>,
    /// New end time.
    pub end_time: Option<NaiveTime>,
    /// New venue.
    pub location: Option<String>,
    /// New cap. `Some(None)` removes the cap.
    pub max_attendees: Option<Option<i32>>,
    /// New status.
    pub status: Option<EventStatus>,
}

impl EventPatch {
    /// Returns `true` if the patch touches anything besides `status`.
    #[must_use]
    pub fn touches_details(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.event_date.is_some()
            || self.start_time.is_some()
            || self.end_time.is_some()
            || self.location.is_some()
            || self.max_attendees.is_some()
    }

    /// Applies the patch to `event`, returning the updated copy.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the result would violate
    /// the same constraints enforced at creation.
    pub fn apply(self, event: &Event, now: DateTime<Utc>) -> Result<Event, GatewayError> {
        let mut updated = event.clone();
        if let Some(name) = self.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(GatewayError::Validation("Event name is required".to_string()));
            }
            updated.name = name;
        }
        if let Some(description) = self.description {
            updated.description = description.trim().to_string();
        }
        if let Some(date) = self.event_date {
            updated.event_date = date;
        }
        if let Some(start) = self.start_time {
            updated.start_time = start;
        }
        if let Some(end) = self.end_time {
            updated.end_time = end;
        }
        if let Some(location) = self.location {
            updated.location = location.trim().to_string();
        }
        if let Some(cap) = self.max_attendees {
            check_capacity(cap)?;
            updated.max_attendees = cap;
        }
        if let Some(status) = self.status {
            updated.status = status;
        }
        check_window(updated.start_time, updated.end_time)?;
        updated.updated_at = now;
        Ok(updated)
    }
}

fn check_window(start: NaiveTime, end: NaiveTime) -> Result<(), GatewayError> {
    if end < start {
        return Err(GatewayError::Validation(
            "Event end time must not precede start time".to_string(),
        ));
    }
    Ok(())
}

fn check_capacity(max_attendees: Option<i32>) -> Result<(), GatewayError> {
    match max_attendees {
        Some(cap) if cap <= 0 => Err(GatewayError::Validation(
            "Maximum attendees must be positive".to_string(),
        )),
        _ => Ok(()),
    }
}
