//! Service layer for owner-scoped task CRUD and completion side effects.

use crate::config::{DEFAULT_COMPLETION_REWARD, TaskmateConfig};
use crate::error::{Classify, ErrorKind};
use crate::notification::{domain::NotificationEvent, ports::NotificationPublisher};
use crate::task::{
    domain::{
        Deadline, NewTaskData, Task, TaskDomainError, TaskId, TaskPatch, TaskPriority, TaskStatus,
        TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::UserId,
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner_id: UserId,
    title: String,
    deadline: String,
    description: Option<String>,
    priority: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(owner_id: UserId, title: impl Into<String>, deadline: impl Into<String>) -> Self {
        Self {
            owner_id,
            title: title.into(),
            deadline: deadline.into(),
            description: None,
            priority: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority label, in any case.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Partial edit of an owned task.
///
/// Only the fields that were set are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    owner_id: UserId,
    task_id: TaskId,
    title: Option<String>,
    description: Option<Option<String>>,
    deadline: Option<String>,
    priority: Option<String>,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an edit that changes nothing until fields are set.
    #[must_use]
    pub const fn new(owner_id: UserId, task_id: TaskId) -> Self {
        Self {
            owner_id,
            task_id,
            title: None,
            description: None,
            deadline: None,
            priority: None,
            status: None,
        }
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description. A blank value clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Sets a new deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Sets a new priority label, in any case.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets a new status label, in any case.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn into_patch(self) -> Result<(UserId, TaskId, TaskPatch), TaskDomainError> {
        let patch = TaskPatch {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description,
            deadline: self.deadline.map(Deadline::new).transpose()?,
            priority: self
                .priority
                .as_deref()
                .map(TaskPriority::try_from)
                .transpose()?,
            status: self
                .status
                .as_deref()
                .map(TaskStatus::try_from)
                .transpose()?,
        };
        Ok((self.owner_id, self.task_id, patch))
    }
}

/// Result of an owner-scoped write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskWriteOutcome {
    /// The task matched and was changed.
    Applied,
    /// No task with that identifier belongs to the caller.
    NoMatchingTask,
    /// The edit carried no fields.
    NothingToApply,
}

impl TaskWriteOutcome {
    /// Returns `true` when stored state changed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Crediting the completion reward failed after the task was updated.
    #[error("failed to award completion points: {0}")]
    Reward(#[from] UserRepositoryError),
}

impl Classify for TaskLifecycleError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) => err.kind(),
            Self::Reward(err) => err.kind(),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Marking a task `Completed` credits the owner's point balance and then
/// publishes a `taskCompleted` event to the owner's listeners. The three
/// writes are separate steps; a failure to credit points is reported after
/// the status change has already been stored.
#[derive(Clone)]
pub struct TaskLifecycleService<T, U, N, C>
where
    T: TaskRepository,
    U: UserRepository,
    N: NotificationPublisher,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    notifier: Arc<N>,
    clock: Arc<C>,
    completion_reward: u64,
}

impl<T, U, N, C> TaskLifecycleService<T, U, N, C>
where
    T: TaskRepository,
    U: UserRepository,
    N: NotificationPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default reward.
    #[must_use]
    pub const fn new(tasks: Arc<T>, users: Arc<U>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            notifier,
            clock,
            completion_reward: DEFAULT_COMPLETION_REWARD,
        }
    }

    /// Overrides the points credited per completion.
    #[must_use]
    pub const fn with_completion_reward(mut self, reward: u64) -> Self {
        self.completion_reward = reward;
        self
    }

    /// Applies the configured completion reward.
    #[must_use]
    pub const fn with_config(self, config: &TaskmateConfig) -> Self {
        self.with_completion_reward(config.completion_reward)
    }

    /// Creates a pending task owned by the requester.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title or deadline is
    /// blank or the priority is unknown, and
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            owner_id,
            title,
            deadline,
            description,
            priority,
        } = request;

        let data = NewTaskData {
            owner_id,
            title: TaskTitle::new(title)?,
            description,
            deadline: Deadline::new(deadline)?,
            priority: priority
                .as_deref()
                .map(TaskPriority::try_from)
                .transpose()?
                .unwrap_or_default(),
        };
        let task = Task::new(data, &*self.clock);
        self.tasks.store(&task).await?;
        tracing::info!(task_id = %task.id(), %owner_id, "created task");
        Ok(task)
    }

    /// Returns one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn get(&self, owner_id: UserId, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_owned(owner_id, task_id).await?)
    }

    /// Returns all of the owner's tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list(&self, owner_id: UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_by_owner(owner_id).await?)
    }

    /// Returns the owner's tasks whose title contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn search(&self, owner_id: UserId, query: &str) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.search_titles(owner_id, query).await?)
    }

    /// Returns the owner's tasks with the given status, `Pending` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for an unknown status label or
    /// [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn filter_by_status(
        &self,
        owner_id: UserId,
        status: Option<&str>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let wanted = status
            .map(TaskStatus::try_from)
            .transpose()?
            .unwrap_or_default();
        Ok(self.tasks.list_by_status(owner_id, wanted).await?)
    }

    /// Applies a partial edit to an owned task.
    ///
    /// Completing a task credits the reward and notifies the owner every time,
    /// including when the task was already completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for invalid fields,
    /// [`TaskLifecycleError::Repository`] when the write fails, or
    /// [`TaskLifecycleError::Reward`] when crediting points fails.
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<TaskWriteOutcome> {
        let (owner_id, task_id, patch) = request.into_patch()?;
        if patch.is_empty() {
            tracing::debug!(%task_id, %owner_id, "empty task edit ignored");
            return Ok(TaskWriteOutcome::NothingToApply);
        }

        let matched = self
            .tasks
            .apply_patch(owner_id, task_id, &patch, self.clock.utc())
            .await?;
        if !matched {
            tracing::debug!(%task_id, %owner_id, "task edit matched no owned task");
            return Ok(TaskWriteOutcome::NoMatchingTask);
        }

        if patch.completes() {
            let balance = self
                .users
                .add_points(owner_id, self.completion_reward)
                .await?;
            tracing::info!(%task_id, %owner_id, balance, "task completed");
            self.notifier
                .publish(owner_id, NotificationEvent::TaskCompleted { task_id });
        }
        Ok(TaskWriteOutcome::Applied)
    }

    /// Deletes an owned task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the delete fails.
    pub async fn delete(
        &self,
        owner_id: UserId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<TaskWriteOutcome> {
        if self.tasks.delete_owned(owner_id, task_id).await? {
            tracing::info!(%task_id, %owner_id, "deleted task");
            Ok(TaskWriteOutcome::Applied)
        } else {
            tracing::debug!(%task_id, %owner_id, "task delete matched no owned task");
            Ok(TaskWriteOutcome::NoMatchingTask)
        }
    }
}
