//! Outcome summary of a reminder batch.

use serde::Serialize;

/// Counts produced by one reminder run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReminderBatchReport {
    /// Users with at least one task due in the window.
    pub recipients: usize,
    /// Messages accepted by the sender.
    pub sent: usize,
    /// Messages that could not be rendered or delivered.
    pub failed: usize,
}
