//! Service layer for sending, accepting, and listing friend requests.

use crate::error::{Classify, ErrorKind};
use crate::friendship::{
    domain::{FriendEdge, FriendshipDomainError},
    ports::{FriendEdgeRepository, FriendEdgeRepositoryError},
};
use crate::user::{
    domain::{EmailAddress, User, UserDomainError, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result of sending a friend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequestOutcome {
    /// A new pending edge was stored.
    Created,
    /// An edge for the pair already existed; nothing changed.
    AlreadyPresent,
}

/// Service-level errors for friendship operations.
#[derive(Debug, Error)]
pub enum FriendshipError {
    /// The edge would be invalid.
    #[error(transparent)]
    Domain(#[from] FriendshipDomainError),
    /// The target email is malformed.
    #[error(transparent)]
    Email(#[from] UserDomainError),
    /// No user is registered under the target email.
    #[error("no user registered with email {0}")]
    TargetNotFound(EmailAddress),
    /// There is no pending request to accept.
    #[error("no pending friend request from {requester} to {accepter}")]
    NoPendingRequest {
        /// User who would have sent the request.
        requester: UserId,
        /// User trying to accept it.
        accepter: UserId,
    },
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Edge persistence failed.
    #[error(transparent)]
    Edges(#[from] FriendEdgeRepositoryError),
}

impl Classify for FriendshipError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::Email(_) => ErrorKind::Validation,
            Self::TargetNotFound(_) | Self::NoPendingRequest { .. } => ErrorKind::NotFound,
            Self::Users(err) => err.kind(),
            Self::Edges(err) => err.kind(),
        }
    }
}

/// Result type for friendship service operations.
pub type FriendshipResult<T> = Result<T, FriendshipError>;

/// Friend request orchestration service.
#[derive(Clone)]
pub struct FriendshipService<U, F, C>
where
    U: UserRepository,
    F: FriendEdgeRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    edges: Arc<F>,
    clock: Arc<C>,
}

impl<U, F, C> FriendshipService<U, F, C>
where
    U: UserRepository,
    F: FriendEdgeRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new friendship service.
    #[must_use]
    pub const fn new(users: Arc<U>, edges: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            users,
            edges,
            clock,
        }
    }

    /// Sends a friend request to the user registered under `target_email`.
    ///
    /// Repeating a request is not an error; the existing edge is kept.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipError::Email`] for a malformed address,
    /// [`FriendshipError::TargetNotFound`] when nobody uses it, and
    /// [`FriendshipError::Domain`] when the target is the requester.
    pub async fn send_request(
        &self,
        requester: UserId,
        target_email: &str,
    ) -> FriendshipResult<FriendRequestOutcome> {
        let email = EmailAddress::new(target_email)?;
        let target = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(FriendshipError::TargetNotFound(email))?;

        let edge = FriendEdge::request(requester, target.id(), &*self.clock)?;
        if self.edges.insert_if_absent(&edge).await? {
            tracing::info!(%requester, target = %target.id(), "friend request sent");
            Ok(FriendRequestOutcome::Created)
        } else {
            tracing::debug!(%requester, target = %target.id(), "friend edge already present");
            Ok(FriendRequestOutcome::AlreadyPresent)
        }
    }

    /// Accepts the pending request from `requester`, making the friendship
    /// mutual.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipError::NoPendingRequest`] when `requester` has no
    /// pending request to `accepter`.
    pub async fn accept_request(&self, accepter: UserId, requester: UserId) -> FriendshipResult<()> {
        let no_pending = FriendshipError::NoPendingRequest {
            requester,
            accepter,
        };
        let Ok(reverse) = FriendEdge::accepted_reverse(accepter, requester, &*self.clock) else {
            return Err(no_pending);
        };
        let accepted = self
            .edges
            .accept_request(requester, accepter, &reverse, self.clock.utc())
            .await?;
        if !accepted {
            return Err(no_pending);
        }
        tracing::info!(%requester, %accepter, "friend request accepted");
        Ok(())
    }

    /// Returns the users `user_id` has an accepted edge to, sorted by name
    /// then email.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipError::Edges`] or [`FriendshipError::Users`] when
    /// lookup fails.
    pub async fn list_friends(&self, user_id: UserId) -> FriendshipResult<Vec<User>> {
        let ids = self.edges.list_accepted_targets(user_id).await?;
        self.load_sorted(&ids).await
    }

    /// Returns users whose request to `user_id` is still pending, sorted by
    /// name then email.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipError::Edges`] or [`FriendshipError::Users`] when
    /// lookup fails.
    pub async fn list_pending_incoming(&self, user_id: UserId) -> FriendshipResult<Vec<User>> {
        let ids = self.edges.list_pending_sources(user_id).await?;
        self.load_sorted(&ids).await
    }

    /// Returns `true` only when both directed edges are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipError::Edges`] when lookup fails.
    pub async fn are_friends(&self, a: UserId, b: UserId) -> FriendshipResult<bool> {
        let forward = self.edges.find_edge(a, b).await?;
        if !forward.is_some_and(|edge| edge.is_accepted()) {
            return Ok(false);
        }
        let backward = self.edges.find_edge(b, a).await?;
        Ok(backward.is_some_and(|edge| edge.is_accepted()))
    }

    async fn load_sorted(&self, ids: &[UserId]) -> FriendshipResult<Vec<User>> {
        let mut users = self.users.find_many(ids).await?;
        users.sort_by(|left, right| {
            left.name()
                .as_str()
                .cmp(right.name().as_str())
                .then_with(|| left.email().as_str().cmp(right.email().as_str()))
        });
        Ok(users)
    }
}
