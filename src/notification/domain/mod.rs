//! Domain types for the notification channel.

mod event;
mod ids;

pub use event::NotificationEvent;
pub use ids::ConnectionId;
