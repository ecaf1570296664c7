//! Outbox that records reminders instead of delivering them.

use crate::reminder::{
    domain::ReminderMessage,
    ports::{ReminderSendError, ReminderSender},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory reminder outbox.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReminderOutbox {
    sent: Arc<RwLock<Vec<ReminderMessage>>>,
}

impl InMemoryReminderOutbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message recorded so far.
    #[must_use]
    pub fn messages(&self) -> Vec<ReminderMessage> {
        self.sent
            .read()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReminderSender for InMemoryReminderOutbox {
    async fn send(&self, message: &ReminderMessage) -> Result<(), ReminderSendError> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| ReminderSendError::Delivery(err.to_string()))?;
        sent.push(message.clone());
        Ok(())
    }
}
