//! Repository port for owner-scoped task persistence.

use crate::error::ErrorKind;
use crate::task::domain::{CompletionCounts, Task, TaskId, TaskPatch, TaskStatus};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every read and write except [`Self::list_all_by_status`] and
/// [`Self::completion_counts`] is scoped to an owner: a task belonging to
/// someone else behaves exactly like a missing task. Listing methods return
/// newest tasks first.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier within the owner's tasks.
    async fn find_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all of the owner's tasks.
    async fn list_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the owner's tasks whose title contains `query`, ignoring case.
    async fn search_titles(&self, owner: UserId, query: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the owner's tasks with exactly the given status.
    async fn list_by_status(
        &self,
        owner: UserId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies `patch` to the task matching both `id` and `owner`.
    ///
    /// Returns `false` when no task matched.
    async fn apply_patch(
        &self,
        owner: UserId,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool>;

    /// Deletes the task matching both `id` and `owner`.
    ///
    /// Returns `false` when no task matched.
    async fn delete_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Tallies completed and incomplete tasks for each of `owners`.
    ///
    /// Owners without tasks may be absent from the map.
    async fn completion_counts(
        &self,
        owners: &[UserId],
    ) -> TaskRepositoryResult<HashMap<UserId, CompletionCounts>>;

    /// Returns every task with the given status across all owners.
    async fn list_all_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The owning user does not exist.
    #[error("task owner not found: {0}")]
    UnknownOwner(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the caller-facing category of this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateTask(_) => ErrorKind::Conflict,
            Self::UnknownOwner(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
