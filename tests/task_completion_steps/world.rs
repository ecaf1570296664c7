//! Shared world state for task completion BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskmate::notification::services::{NotificationHub, Subscription};
use taskmate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService, TaskWriteOutcome},
};
use taskmate::user::{
    adapters::memory::InMemoryUserRepository, domain::UserId, services::UserDirectoryService,
};

/// Task service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    NotificationHub,
    DefaultClock,
>;

/// Scenario world for task completion behaviour tests.
pub struct TaskCompletionWorld {
    pub users: UserDirectoryService<InMemoryUserRepository, DefaultClock>,
    pub tasks: TestTaskService,
    pub hub: Arc<NotificationHub>,
    pub user_ids: HashMap<String, UserId>,
    pub listeners: HashMap<String, Subscription>,
    pub task: Option<Task>,
    pub last_outcome: Option<Result<TaskWriteOutcome, TaskLifecycleError>>,
}

impl TaskCompletionWorld {
    /// Creates a world over empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let hub = Arc::new(NotificationHub::new(4));
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserDirectoryService::new(Arc::clone(&user_repository), Arc::clone(&clock)),
            tasks: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                user_repository,
                Arc::clone(&hub),
                clock,
            ),
            hub,
            user_ids: HashMap::new(),
            listeners: HashMap::new(),
            task: None,
            last_outcome: None,
        }
    }

    /// Looks up a user registered earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no user was registered under `name`.
    pub fn user(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.user_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("user {name} was not registered in this scenario"))
    }

    /// Returns the task created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskCompletionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskCompletionWorld {
    TaskCompletionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
