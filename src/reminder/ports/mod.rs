//! Port contracts for reminder delivery.

mod sender;

pub use sender::{ReminderSendError, ReminderSender};
