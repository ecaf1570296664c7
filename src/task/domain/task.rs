//! Task aggregate root.

use super::{Deadline, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// The owner is fixed at creation; a task is visible and mutable only
/// through queries scoped to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: UserId,
    title: TaskTitle,
    description: Option<String>,
    deadline: Deadline,
    priority: TaskPriority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning user.
    pub owner_id: UserId,
    /// Task title.
    pub title: TaskTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Deadline text.
    pub deadline: Deadline,
    /// Priority; defaults to low when the caller gave none.
    pub priority: TaskPriority,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner_id: UserId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted deadline.
    pub deadline: Deadline,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner_id: data.owner_id,
            title: data.title,
            description: normalize_description(data.description),
            deadline: data.deadline,
            priority: data.priority,
            status: TaskStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            title: data.title,
            description: data.description,
            deadline: data.deadline,
            priority: data.priority,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrites the fields present in `patch` and stamps `updated_at`.
    ///
    /// Identity and owner are never touched.
    pub fn apply(&mut self, patch: &TaskPatch, updated_at: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = normalize_description(description.clone());
        }
        if let Some(deadline) = &patch.deadline {
            self.deadline = deadline.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = updated_at;
    }
}

/// Blank descriptions are stored as absent.
pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}
