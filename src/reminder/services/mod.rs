//! Application services for deadline reminders.

mod deadline;

pub use deadline::{DeadlineReminderService, ReminderError, ReminderResult};
