//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The endpoint at `/ws` streams attendance events live, filtered per
//! connection by the events the client subscribed to.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
