//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::SessionContext;

/// `GET /ws`: Upgrade HTTP connection to WebSocket.
///
/// The upgrade request carries the same bearer token as REST calls.
pub async fn ws_handler(
    ctx: SessionContext,
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let event_rx = state.event_bus.subscribe();
    let service = Arc::clone(&state.attendance_service);

    ws.on_upgrade(move |socket| run_connection(socket, event_rx, service, ctx))
}
