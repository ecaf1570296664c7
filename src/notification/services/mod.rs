//! Connection registry for the notification channel.

mod hub;

pub use hub::{NotificationHub, Subscription};
