//! Reminder messages and batch reports.

mod message;
mod report;

pub use message::ReminderMessage;
pub use report::ReminderBatchReport;
