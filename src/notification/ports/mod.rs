//! Port contracts for publishing notifications.

mod publisher;

pub use publisher::NotificationPublisher;
