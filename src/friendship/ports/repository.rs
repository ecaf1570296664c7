//! Repository port for directed friend edges.

use crate::error::ErrorKind;
use crate::friendship::domain::FriendEdge;
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for friend edge repository operations.
pub type FriendEdgeRepositoryResult<T> = Result<T, FriendEdgeRepositoryError>;

/// Friend edge persistence contract.
#[async_trait]
pub trait FriendEdgeRepository: Send + Sync {
    /// Inserts `edge` unless an edge already exists for its ordered pair.
    ///
    /// Returns `true` when the edge was inserted.
    async fn insert_if_absent(&self, edge: &FriendEdge) -> FriendEdgeRepositoryResult<bool>;

    /// Accepts the pending edge `requester -> accepter` and stores `reverse`
    /// as one atomic unit.
    ///
    /// An existing reverse edge is promoted to accepted rather than
    /// duplicated. Returns `false`, writing nothing, when no pending edge
    /// matched.
    async fn accept_request(
        &self,
        requester: UserId,
        accepter: UserId,
        reverse: &FriendEdge,
        accepted_at: DateTime<Utc>,
    ) -> FriendEdgeRepositoryResult<bool>;

    /// Finds the edge for the ordered pair.
    async fn find_edge(
        &self,
        source: UserId,
        target: UserId,
    ) -> FriendEdgeRepositoryResult<Option<FriendEdge>>;

    /// Returns targets of accepted edges leaving `source`.
    async fn list_accepted_targets(&self, source: UserId) -> FriendEdgeRepositoryResult<Vec<UserId>>;

    /// Returns sources of pending edges arriving at `target`.
    async fn list_pending_sources(&self, target: UserId) -> FriendEdgeRepositoryResult<Vec<UserId>>;
}

/// Errors returned by friend edge repository implementations.
#[derive(Debug, Clone, Error)]
pub enum FriendEdgeRepositoryError {
    /// An edge endpoint does not reference an existing user.
    #[error("friend edge references an unknown user")]
    UnknownUser,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FriendEdgeRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the caller-facing category of this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownUser => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
