//! Directed friend edge aggregate.

use super::{EdgeStatus, FriendEdgeId, FriendshipDomainError};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Directed relation from `source_id` to `target_id`.
///
/// At most one edge exists per ordered pair, and never from a user to
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendEdge {
    id: FriendEdgeId,
    source_id: UserId,
    target_id: UserId,
    status: EdgeStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFriendEdgeData {
    /// Persisted edge identifier.
    pub id: FriendEdgeId,
    /// Persisted source user.
    pub source_id: UserId,
    /// Persisted target user.
    pub target_id: UserId,
    /// Persisted status.
    pub status: EdgeStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last transition timestamp.
    pub updated_at: DateTime<Utc>,
}

impl FriendEdge {
    /// Creates a pending request edge from `requester` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipDomainError::SelfRequest`] when both are the same
    /// user.
    pub fn request(
        requester: UserId,
        target: UserId,
        clock: &impl Clock,
    ) -> Result<Self, FriendshipDomainError> {
        Self::build(requester, target, EdgeStatus::Pending, clock)
    }

    /// Creates the accepted edge pointing back from `accepter` to
    /// `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipDomainError::SelfRequest`] when both are the same
    /// user.
    pub fn accepted_reverse(
        accepter: UserId,
        requester: UserId,
        clock: &impl Clock,
    ) -> Result<Self, FriendshipDomainError> {
        Self::build(accepter, requester, EdgeStatus::Accepted, clock)
    }

    fn build(
        source_id: UserId,
        target_id: UserId,
        status: EdgeStatus,
        clock: &impl Clock,
    ) -> Result<Self, FriendshipDomainError> {
        if source_id == target_id {
            return Err(FriendshipDomainError::SelfRequest(source_id));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: FriendEdgeId::new(),
            source_id,
            target_id,
            status,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an edge from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedFriendEdgeData) -> Self {
        Self {
            id: data.id,
            source_id: data.source_id,
            target_id: data.target_id,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the edge identifier.
    #[must_use]
    pub const fn id(&self) -> FriendEdgeId {
        self.id
    }

    /// Returns the user the edge starts from.
    #[must_use]
    pub const fn source_id(&self) -> UserId {
        self.source_id
    }

    /// Returns the user the edge points to.
    #[must_use]
    pub const fn target_id(&self) -> UserId {
        self.target_id
    }

    /// Returns the edge status.
    #[must_use]
    pub const fn status(&self) -> EdgeStatus {
        self.status
    }

    /// Returns `true` when the edge is accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status == EdgeStatus::Accepted
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last transition timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the edge accepted. Accepting an accepted edge only restamps it.
    pub const fn accept(&mut self, at: DateTime<Utc>) {
        self.status = EdgeStatus::Accepted;
        self.updated_at = at;
    }
}
