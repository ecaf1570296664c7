//! Publishing port used by the task lifecycle.

use crate::notification::domain::NotificationEvent;
use crate::user::domain::UserId;

/// Fire-and-forget delivery of events to a user's listeners.
///
/// Publishing never fails: an event with no listeners is dropped.
pub trait NotificationPublisher: Send + Sync {
    /// Delivers `event` to every listener connected under `user_id`.
    ///
    /// Returns the number of connections that accepted the event.
    fn publish(&self, user_id: UserId, event: NotificationEvent) -> usize;
}
