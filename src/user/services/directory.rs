//! Service layer for user registration, lookup, profile edits, and point
//! accrual.

use crate::error::{Classify, ErrorKind};
use crate::user::{
    domain::{
        CredentialHash, DisplayName, EmailAddress, ProfileChanges, User, UserDomainError, UserId,
    },
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    credential_hash: String,
}

impl RegisterUserRequest {
    /// Creates a registration request.
    ///
    /// `credential_hash` is the output of the authentication collaborator's
    /// password hashing; it is stored verbatim.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        credential_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            credential_hash: credential_hash.into(),
        }
    }
}

/// Partial profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    user_id: UserId,
    name: Option<String>,
    email: Option<String>,
}

impl UpdateProfileRequest {
    /// Creates an edit that changes nothing until fields are set.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            name: None,
            email: None,
        }
    }

    /// Sets a new display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

impl Classify for UserDirectoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for user directory service operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User directory orchestration service.
#[derive(Clone)]
pub struct UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user with a zero point balance.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] for invalid input or
    /// [`UserDirectoryError::Repository`] when the email is taken or
    /// persistence fails.
    pub async fn register(&self, request: RegisterUserRequest) -> UserDirectoryResult<User> {
        let RegisterUserRequest {
            name,
            email,
            credential_hash,
        } = request;

        let user = User::register(
            DisplayName::new(name)?,
            EmailAddress::new(email)?,
            CredentialHash::new(credential_hash)?,
            &*self.clock,
        );
        self.repository.store(&user).await?;
        tracing::info!(user_id = %user.id(), "registered user");
        Ok(user)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a user by email; the address is normalized before lookup.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] for a malformed address or
    /// [`UserDirectoryError::Repository`] when lookup fails.
    pub async fn find_by_email(&self, email: &str) -> UserDirectoryResult<Option<User>> {
        let address = EmailAddress::new(email)?;
        Ok(self.repository.find_by_email(&address).await?)
    }

    /// Applies a partial profile edit.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] with
    /// [`UserRepositoryError::NotFound`] for unknown users or
    /// [`UserRepositoryError::DuplicateEmail`] when the new email is taken.
    pub async fn update_profile(&self, request: UpdateProfileRequest) -> UserDirectoryResult<User> {
        let UpdateProfileRequest {
            user_id,
            name,
            email,
        } = request;

        let mut changes = ProfileChanges::new(&*self.clock);
        if let Some(raw) = name {
            changes = changes.with_name(DisplayName::new(raw)?);
        }
        if let Some(raw) = email {
            changes = changes.with_email(EmailAddress::new(raw)?);
        }

        if changes.is_empty() {
            return Ok(self
                .repository
                .find_by_id(user_id)
                .await?
                .ok_or(UserRepositoryError::NotFound(user_id))?);
        }
        let user = self.repository.update_profile(user_id, &changes).await?;
        tracing::debug!(%user_id, "updated profile");
        Ok(user)
    }

    /// Credits points to a user and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when the user is unknown or
    /// persistence fails.
    pub async fn award_points(&self, user_id: UserId, amount: u64) -> UserDirectoryResult<u64> {
        let balance = self.repository.add_points(user_id, amount).await?;
        tracing::debug!(%user_id, amount, balance, "awarded points");
        Ok(balance)
    }
}
