//! Notification sinks.

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::domain::SessionEvent;
use crate::ports::NotificationSink;

/// Buffers events until the presentation layer drains them.
///
/// Every event is also written to the tracing log as it arrives.
#[derive(Debug, Default)]
pub struct QueuedNotifier {
    pending: RwLock<Vec<SessionEvent>>,
}

impl QueuedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get and clear pending events.
    pub fn take_pending(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.pending.write())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.read().is_empty()
    }
}

impl NotificationSink for QueuedNotifier {
    fn notify(&self, event: SessionEvent) {
        LogNotifier.notify(event.clone());
        self.pending.write().push(event);
    }
}

/// Writes events to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, event: SessionEvent) {
        if event.is_failure() {
            warn!(event = event.event_type(), "{}", event);
        } else {
            info!(event = event.event_type(), "{}", event);
        }
    }
}
