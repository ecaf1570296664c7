//! Delivery port for rendered reminders.

use crate::reminder::domain::ReminderMessage;
use async_trait::async_trait;
use thiserror::Error;

/// External reminder delivery, such as an email relay.
#[async_trait]
pub trait ReminderSender: Send + Sync {
    /// Delivers one message.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderSendError`] when the message was not accepted.
    async fn send(&self, message: &ReminderMessage) -> Result<(), ReminderSendError>;
}

/// Errors returned by reminder senders.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReminderSendError {
    /// The delivery collaborator rejected or failed the message.
    #[error("reminder delivery failed: {0}")]
    Delivery(String),
}
