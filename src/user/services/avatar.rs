//! Service layer for avatar uploads.

use crate::error::{Classify, ErrorKind};
use crate::user::{
    domain::{AvatarExtension, AvatarRef, ProfileChanges, User, UserDomainError, UserId},
    ports::{AvatarStore, AvatarStoreError, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Avatar upload payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAvatarRequest {
    user_id: UserId,
    bytes: Vec<u8>,
    extension: String,
}

impl UploadAvatarRequest {
    /// Creates an upload request; `extension` is taken from the uploaded
    /// file name (for example `png` or `.JPEG`).
    #[must_use]
    pub fn new(user_id: UserId, bytes: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            user_id,
            bytes,
            extension: extension.into(),
        }
    }
}

/// Service-level errors for avatar operations.
#[derive(Debug, Error)]
pub enum AvatarServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// User repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Blob storage failed.
    #[error(transparent)]
    Store(#[from] AvatarStoreError),
}

impl Classify for AvatarServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) => err.kind(),
            Self::Store(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for avatar service operations.
pub type AvatarServiceResult<T> = Result<T, AvatarServiceError>;

/// Avatar upload orchestration service.
#[derive(Clone)]
pub struct AvatarService<R, S, C>
where
    R: UserRepository,
    S: AvatarStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> AvatarService<R, S, C>
where
    R: UserRepository,
    S: AvatarStore,
    C: Clock + Send + Sync,
{
    /// Creates a new avatar service.
    #[must_use]
    pub const fn new(repository: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            store,
            clock,
        }
    }

    /// Stores the image and points the user's profile at it.
    ///
    /// The blob is written before the profile so a stored reference always
    /// resolves.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarServiceError::Domain`] for empty images or unsupported
    /// extensions, [`AvatarServiceError::Repository`] for unknown users, and
    /// [`AvatarServiceError::Store`] when the blob write fails.
    pub async fn upload(&self, request: UploadAvatarRequest) -> AvatarServiceResult<User> {
        let UploadAvatarRequest {
            user_id,
            bytes,
            extension,
        } = request;

        let extension = AvatarExtension::try_from(extension.as_str())?;
        let avatar_ref = AvatarRef::for_content(&bytes, extension)?;

        if self.repository.find_by_id(user_id).await?.is_none() {
            return Err(UserRepositoryError::NotFound(user_id).into());
        }

        self.store.put(&avatar_ref, &bytes).await?;
        let changes = ProfileChanges::new(&*self.clock).with_avatar(avatar_ref);
        let user = self.repository.update_profile(user_id, &changes).await?;
        tracing::info!(%user_id, "updated avatar");
        Ok(user)
    }

    /// Reads back the avatar image for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarServiceError::Repository`] for unknown users or
    /// [`AvatarServiceError::Store`] when the read fails.
    pub async fn fetch(&self, user_id: UserId) -> AvatarServiceResult<Option<Vec<u8>>> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserRepositoryError::NotFound(user_id))?;
        match user.avatar_ref() {
            Some(avatar_ref) => Ok(self.store.get(avatar_ref).await?),
            None => Ok(None),
        }
    }
}
