//! Rendered reminder addressed to one user.

use crate::task::domain::TaskId;
use crate::user::domain::{EmailAddress, UserId};

/// One rendered reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    /// Recipient.
    pub user_id: UserId,
    /// Recipient address.
    pub email: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Tasks listed in the body, earliest deadline first.
    pub task_ids: Vec<TaskId>,
}
