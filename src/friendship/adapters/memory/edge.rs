//! In-memory friend edge repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::friendship::{
    domain::{EdgeStatus, FriendEdge},
    ports::{FriendEdgeRepository, FriendEdgeRepositoryError, FriendEdgeRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory friend edge repository.
///
/// Edges are keyed by their ordered `(source, target)` pair. Accepting a
/// request happens under a single write lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFriendEdgeRepository {
    state: Arc<RwLock<HashMap<(UserId, UserId), FriendEdge>>>,
}

impl InMemoryFriendEdgeRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored edges.
    ///
    /// # Errors
    ///
    /// Returns [`FriendEdgeRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn edge_count(&self) -> FriendEdgeRepositoryResult<usize> {
        Ok(self.state.read().map_err(lock_error)?.len())
    }
}

fn lock_error(err: impl ToString) -> FriendEdgeRepositoryError {
    FriendEdgeRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl FriendEdgeRepository for InMemoryFriendEdgeRepository {
    async fn insert_if_absent(&self, edge: &FriendEdge) -> FriendEdgeRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let key = (edge.source_id(), edge.target_id());
        if state.contains_key(&key) {
            return Ok(false);
        }
        state.insert(key, edge.clone());
        Ok(true)
    }

    async fn accept_request(
        &self,
        requester: UserId,
        accepter: UserId,
        reverse: &FriendEdge,
        accepted_at: DateTime<Utc>,
    ) -> FriendEdgeRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(forward) = state
            .get_mut(&(requester, accepter))
            .filter(|edge| edge.status() == EdgeStatus::Pending)
        else {
            return Ok(false);
        };
        forward.accept(accepted_at);

        state
            .entry((reverse.source_id(), reverse.target_id()))
            .and_modify(|existing| existing.accept(accepted_at))
            .or_insert_with(|| reverse.clone());
        Ok(true)
    }

    async fn find_edge(
        &self,
        source: UserId,
        target: UserId,
    ) -> FriendEdgeRepositoryResult<Option<FriendEdge>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&(source, target)).cloned())
    }

    async fn list_accepted_targets(&self, source: UserId) -> FriendEdgeRepositoryResult<Vec<UserId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .values()
            .filter(|edge| edge.source_id() == source && edge.is_accepted())
            .map(FriendEdge::target_id)
            .collect())
    }

    async fn list_pending_sources(&self, target: UserId) -> FriendEdgeRepositoryResult<Vec<UserId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .values()
            .filter(|edge| edge.target_id() == target && edge.status() == EdgeStatus::Pending)
            .map(FriendEdge::source_id)
            .collect())
    }
}
