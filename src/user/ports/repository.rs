//! Repository port for user persistence and point accrual.

use crate::error::ErrorKind;
use crate::user::domain::{EmailAddress, ProfileChanges, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier
    /// exists or [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already registered.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Writes the present fields of `changes` and returns the updated user.
    ///
    /// Absent fields and the point balance are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist
    /// or [`UserRepositoryError::DuplicateEmail`] when the new email belongs
    /// to another user.
    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> UserRepositoryResult<User>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by normalized email.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Returns the users among `ids` that exist, in no particular order.
    async fn find_many(&self, ids: &[UserId]) -> UserRepositoryResult<Vec<User>>;

    /// Returns every registered user, in no particular order.
    async fn list_all(&self) -> UserRepositoryResult<Vec<User>>;

    /// Atomically increments the point balance and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist.
    async fn add_points(&self, id: UserId, amount: u64) -> UserRepositoryResult<u64>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The email address is already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the caller-facing category of this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateUser(_) | Self::DuplicateEmail(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
