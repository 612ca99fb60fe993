//! Per-connection subscription manager.
//!
//! Tracks which events a WebSocket client follows and filters the
//! broadcast stream server-side.

use std::collections::HashSet;

use crate::domain::EventId;

/// Wildcard token accepted in `event_ids`.
pub const WILDCARD: &str = "*";

/// Manages the set of event subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    event_ids: HashSet<EventId>,
    subscribe_all: bool,
}

/// Result of parsing a client-supplied `event_ids` list.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedIds {
    /// Well-formed event IDs.
    pub ids: Vec<EventId>,
    /// Whether `"*"` was present.
    pub wildcard: bool,
    /// Entries that were neither `"*"` nor a UUID.
    pub rejected: Vec<String>,
}

impl ParsedIds {
    /// Splits raw strings into IDs, the wildcard flag, and rejects.
    #[must_use]
    pub fn parse(raw: &[String]) -> Self {
        let mut parsed = Self::default();
        for value in raw {
            if value.trim() == WILDCARD {
                parsed.wildcard = true;
            } else if let Ok(id) = value.parse::<EventId>() {
                parsed.ids.push(id);
            } else {
                parsed.rejected.push(value.clone());
            }
        }
        parsed
    }
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds event IDs; `wildcard` follows every event.
    pub fn subscribe(&mut self, ids: &[EventId], wildcard: bool) {
        self.subscribe_all |= wildcard;
        self.event_ids.extend(ids.iter().copied());
    }

    /// Removes event IDs; `wildcard` clears the follow-all flag.
    pub fn unsubscribe(&mut self, ids: &[EventId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for id in ids {
            self.event_ids.remove(id);
        }
    }

    /// Returns `true` if events for `event_id` should be forwarded.
    #[must_use]
    pub fn matches(&self, event_id: EventId) -> bool {
        self.subscribe_all || self.event_ids.contains(&event_id)
    }

    /// Number of explicitly followed events.
    #[must_use]
    pub fn count(&self) -> usize {
        self.event_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(EventId::new()));
    }

    #[test]
    fn explicit_ids_filter_events() {
        let mut mgr = SubscriptionManager::new();
        let followed = EventId::new();
        mgr.subscribe(&[followed], false);
        assert!(mgr.matches(followed));
        assert!(!mgr.matches(EventId::new()));

        mgr.unsubscribe(&[followed], false);
        assert!(!mgr.matches(followed));
        assert_eq!(mgr.count(), 0);
    }

    #[test]
    fn wildcard_can_be_dropped() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(EventId::new()));
        mgr.unsubscribe(&[], true);
        assert!(!mgr.is_subscribed_all());
    }

    #[test]
    fn parse_separates_rejects() {
        let id = EventId::new();
        let raw = vec![id.to_string(), "*".to_string(), "e1".to_string()];
        let parsed = ParsedIds::parse(&raw);
        assert_eq!(parsed.ids, vec![id]);
        assert!(parsed.wildcard);
        assert_eq!(parsed.rejected, vec!["e1".to_string()]);
    }
}
