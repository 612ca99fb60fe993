//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::AttendanceService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Attendance service for all business logic.
    pub attendance_service: Arc<AttendanceService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wraps a service, sharing its event bus with the WebSocket layer.
    #[must_use]
    pub fn new(service: AttendanceService) -> Self {
        let event_bus = service.event_bus().clone();
        Self {
            attendance_service: Arc::new(service),
            event_bus,
        }
    }
}
