//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskmate::friendship::{
    adapters::memory::InMemoryFriendEdgeRepository, services::FriendshipService,
};
use taskmate::leaderboard::services::LeaderboardService;
use taskmate::notification::services::NotificationHub;
use taskmate::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use taskmate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::UserId,
    services::{RegisterUserRequest, UserDirectoryService},
};

/// Task service wired to in-memory adapters and a live hub.
pub type Tasks = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    NotificationHub,
    DefaultClock,
>;

/// Friendship service wired to in-memory adapters.
pub type Friends =
    FriendshipService<InMemoryUserRepository, InMemoryFriendEdgeRepository, DefaultClock>;

/// Leaderboard service wired to in-memory adapters.
pub type Leaderboard =
    LeaderboardService<InMemoryUserRepository, InMemoryTaskRepository, InMemoryFriendEdgeRepository>;

/// Every service sharing one set of repositories.
pub struct App {
    /// User directory.
    pub users: UserDirectoryService<InMemoryUserRepository, DefaultClock>,
    /// Task lifecycle.
    pub tasks: Tasks,
    /// Friend graph.
    pub friends: Friends,
    /// Leaderboard aggregator.
    pub leaderboard: Leaderboard,
    /// Notification registry.
    pub hub: Arc<NotificationHub>,
    /// Shared task storage.
    pub task_repository: Arc<InMemoryTaskRepository>,
    /// Shared user storage.
    pub user_repository: Arc<InMemoryUserRepository>,
}

impl App {
    /// Registers a user named `name` with address `<name>@example.com`.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn register(&self, name: &str) -> Result<UserId, eyre::Report> {
        let email = format!("{}@example.com", name.to_lowercase());
        let user = self
            .users
            .register(RegisterUserRequest::new(name, email, "argon2-hash"))
            .await?;
        Ok(user.id())
    }
}

/// Builds an application over empty in-memory repositories.
#[fixture]
pub fn app() -> App {
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let task_repository = Arc::new(InMemoryTaskRepository::new());
    let edges = Arc::new(InMemoryFriendEdgeRepository::new());
    let hub = Arc::new(NotificationHub::new(8));
    let clock = Arc::new(DefaultClock);

    App {
        users: UserDirectoryService::new(Arc::clone(&user_repository), Arc::clone(&clock)),
        tasks: TaskLifecycleService::new(
            Arc::clone(&task_repository),
            Arc::clone(&user_repository),
            Arc::clone(&hub),
            Arc::clone(&clock),
        ),
        friends: FriendshipService::new(
            Arc::clone(&user_repository),
            Arc::clone(&edges),
            Arc::clone(&clock),
        ),
        leaderboard: LeaderboardService::new(
            Arc::clone(&user_repository),
            Arc::clone(&task_repository),
            edges,
        ),
        hub,
        task_repository,
        user_repository,
    }
}
