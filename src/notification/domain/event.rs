//! Events pushed to connected listeners.

use crate::task::domain::TaskId;
use serde::{Deserialize, Serialize};

/// Event delivered over the notification channel.
///
/// Serializes as `{"type":"taskCompleted","taskId":"<uuid>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NotificationEvent {
    /// A task owned by the recipient was marked completed.
    TaskCompleted {
        /// Completed task.
        #[serde(rename = "taskId")]
        task_id: TaskId,
    },
}

impl NotificationEvent {
    /// Returns the wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TaskCompleted { .. } => "taskCompleted",
        }
    }

    /// Encodes the event as its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
