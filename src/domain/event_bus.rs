//! In-process fan-out of [`AttendanceEvent`]s to live-feed listeners.

use tokio::sync::broadcast;

use super::AttendanceEvent;

/// Cloneable handle to a `tokio::broadcast` channel of attendance events.
///
/// Publishing never blocks and never fails: with no listeners the event is
/// discarded, and a listener that falls more than `capacity` events behind
/// loses the oldest ones (it observes `RecvError::Lagged`).
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AttendanceEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per listener.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Broadcasts `event`, returning how many listeners it reached.
    pub fn publish(&self, event: AttendanceEvent) -> usize {
        let kind = event.event_type_str();
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::trace!(kind, delivered, "attendance event published");
        delivered
    }

    /// Opens a listener that sees every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AttendanceEvent> {
        self.sender.subscribe()
    }

    /// Number of open listeners.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
