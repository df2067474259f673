//! Notification sink port (interface).

use crate::domain::SessionEvent;

/// Port for surfacing lifecycle events and failures to the user.
///
/// Sinks are pure display collaborators; they must not fail.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, event: SessionEvent);
}
