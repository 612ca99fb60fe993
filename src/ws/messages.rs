//! WebSocket message types: envelope, commands, and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    #[serde(default)]
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server-originated message stamped with the current time.
    #[must_use]
    pub fn new(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error message replying to `id`.
    #[must_use]
    pub fn error(id: String, code: u16, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to events for specific events.
    Subscribe {
        /// Event IDs to subscribe to. Use `["*"]` for all events.
        event_ids: Vec<String>,
    },
    /// Unsubscribe from specific events. `"*"` drops the wildcard.
    Unsubscribe {
        /// Event IDs to unsubscribe from.
        event_ids: Vec<String>,
    },
    /// Fetch current counters for one event.
    GetStats {
        /// Target event ID.
        event_id: String,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_command_parses() {
        let payload = serde_json::json!({"command": "subscribe", "event_ids": ["*"]});
        let Ok(cmd) = serde_json::from_value::<WsCommand>(payload) else {
            panic!("command should parse");
        };
        assert_eq!(
            cmd,
            WsCommand::Subscribe {
                event_ids: vec!["*".to_string()]
            }
        );
    }

    #[test]
    fn envelope_defaults_missing_fields() {
        let text = r#"{"type":"command","payload":{"command":"get_stats","event_id":"x"}}"#;
        let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
            panic!("envelope should parse");
        };
        assert_eq!(msg.msg_type, WsMessageType::Command);
        assert!(msg.id.is_empty());
    }

    #[test]
    fn unknown_command_is_rejected() {
        let payload = serde_json::json!({"command": "launch"});
        assert!(serde_json::from_value::<WsCommand>(payload).is_err());
    }
}
