//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::{ParsedIds, SubscriptionManager};
use crate::domain::{AttendanceEvent, EventId, SessionContext};
use crate::service::AttendanceService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<AttendanceEvent>,
    service: Arc<AttendanceService>,
    ctx: SessionContext,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();
    tracing::debug!(user = %ctx.user_id, "ws connection opened");

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs, &service, &ctx).await;
                        let Ok(json) = serde_json::to_string(&reply) else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        if !subs.matches(event.event_id()) {
                            continue;
                        }
                        let msg = WsMessage::new(
                            uuid::Uuid::new_v4().to_string(),
                            WsMessageType::Event,
                            serde_json::to_value(&event).unwrap_or_default(),
                        );
                        let json = serde_json::to_string(&msg).unwrap_or_default();
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!(user = %ctx.user_id, "ws connection closed");
}

/// Handles a text frame from the client and builds the reply.
pub async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    service: &AttendanceService,
    ctx: &SessionContext,
) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error(String::new(), 400, "malformed JSON");
    };
    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 400, "expected a command message");
    }
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return WsMessage::error(msg.id, 404, "unknown command");
    };

    match command {
        WsCommand::Subscribe { event_ids } => {
            let parsed = ParsedIds::parse(&event_ids);
            subs.subscribe(&parsed.ids, parsed.wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": parsed.ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "rejected": parsed.rejected,
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { event_ids } => {
            let parsed = ParsedIds::parse(&event_ids);
            subs.unsubscribe(&parsed.ids, parsed.wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": parsed.ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "remaining_count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::GetStats { event_id } => {
            let Ok(event_id) = event_id.parse::<EventId>() else {
                return WsMessage::error(msg.id, 404, "Event not found");
            };
            match service.event_stats(ctx, event_id).await {
                Ok(stats) => WsMessage::new(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::to_value(&stats).unwrap_or_default(),
                ),
                Err(e) => WsMessage::error(msg.id, e.status_code().as_u16(), &e.to_string()),
            }
        }
    }
}
