//! Shared world state for friendship handshake BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskmate::friendship::{
    adapters::memory::InMemoryFriendEdgeRepository,
    services::{FriendRequestOutcome, FriendshipError, FriendshipService},
};
use taskmate::user::{
    adapters::memory::InMemoryUserRepository, domain::UserId, services::UserDirectoryService,
};

/// Friendship service type used by the BDD world.
pub type TestFriendshipService =
    FriendshipService<InMemoryUserRepository, InMemoryFriendEdgeRepository, DefaultClock>;

/// Scenario world for friendship behaviour tests.
pub struct FriendshipWorld {
    pub users: UserDirectoryService<InMemoryUserRepository, DefaultClock>,
    pub friendship: TestFriendshipService,
    pub edges: Arc<InMemoryFriendEdgeRepository>,
    pub user_ids: HashMap<String, UserId>,
    pub last_request: Option<Result<FriendRequestOutcome, FriendshipError>>,
    pub last_acceptance: Option<Result<(), FriendshipError>>,
}

impl FriendshipWorld {
    /// Creates a world over empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let edges = Arc::new(InMemoryFriendEdgeRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserDirectoryService::new(Arc::clone(&user_repository), Arc::clone(&clock)),
            friendship: FriendshipService::new(user_repository, Arc::clone(&edges), clock),
            edges,
            user_ids: HashMap::new(),
            last_request: None,
            last_acceptance: None,
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
}

impl Default for FriendshipWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> FriendshipWorld {
    FriendshipWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
