//! Joins the user population against task completion counts.

use crate::error::{Classify, ErrorKind};
use crate::friendship::ports::{FriendEdgeRepository, FriendEdgeRepositoryError};
use crate::leaderboard::domain::{LeaderboardDomainError, LeaderboardEntry, LeaderboardScope, rank};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for leaderboard queries.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The scope selector was not recognized.
    #[error(transparent)]
    Scope(#[from] LeaderboardDomainError),
    /// Loading the user population failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Counting tasks failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Resolving the viewer's friends failed.
    #[error(transparent)]
    Edges(#[from] FriendEdgeRepositoryError),
}

impl Classify for LeaderboardError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Scope(_) => ErrorKind::Validation,
            Self::Users(err) => err.kind(),
            Self::Tasks(err) => err.kind(),
            Self::Edges(err) => err.kind(),
        }
    }
}

/// Result type for leaderboard queries.
pub type LeaderboardResult<T> = Result<T, LeaderboardError>;

/// Read-only leaderboard aggregator.
#[derive(Clone)]
pub struct LeaderboardService<U, T, F>
where
    U: UserRepository,
    T: TaskRepository,
    F: FriendEdgeRepository,
{
    users: Arc<U>,
    tasks: Arc<T>,
    edges: Arc<F>,
}

impl<U, T, F> LeaderboardService<U, T, F>
where
    U: UserRepository,
    T: TaskRepository,
    F: FriendEdgeRepository,
{
    /// Creates a new leaderboard service.
    #[must_use]
    pub const fn new(users: Arc<U>, tasks: Arc<T>, edges: Arc<F>) -> Self {
        Self {
            users,
            tasks,
            edges,
        }
    }

    /// Ranks the population selected by `scope` as seen by `viewer`.
    ///
    /// Users without tasks appear with zero counts. The `friends` scope
    /// covers the viewer's accepted friends and not the viewer.
    ///
    /// # Errors
    ///
    /// Returns a [`LeaderboardError`] when any repository read fails.
    pub async fn rank(
        &self,
        scope: LeaderboardScope,
        viewer: UserId,
    ) -> LeaderboardResult<Vec<LeaderboardEntry>> {
        let population = self.population(scope, viewer).await?;
        let ids: Vec<UserId> = population.iter().map(User::id).collect();
        let counts = self.tasks.completion_counts(&ids).await?;

        let entries = population
            .into_iter()
            .map(|user| {
                let tally = counts.get(&user.id()).copied().unwrap_or_default();
                LeaderboardEntry {
                    name: user.name().as_str().to_owned(),
                    email: user.email().as_str().to_owned(),
                    completed: tally.completed,
                    incomplete: tally.incomplete,
                }
            })
            .collect();
        Ok(rank(entries))
    }

    /// Ranks using a textual scope selector such as `"friends"`.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::Scope`] for an unknown selector, otherwise
    /// the errors of [`Self::rank`].
    pub async fn rank_by_selector(
        &self,
        selector: &str,
        viewer: UserId,
    ) -> LeaderboardResult<Vec<LeaderboardEntry>> {
        let scope = LeaderboardScope::try_from(selector)?;
        self.rank(scope, viewer).await
    }

    async fn population(
        &self,
        scope: LeaderboardScope,
        viewer: UserId,
    ) -> LeaderboardResult<Vec<User>> {
        match scope {
            LeaderboardScope::Global => Ok(self.users.list_all().await?),
            LeaderboardScope::Friends => {
                let friends = self.edges.list_accepted_targets(viewer).await?;
                Ok(self.users.find_many(&friends).await?)
            }
        }
    }
}
