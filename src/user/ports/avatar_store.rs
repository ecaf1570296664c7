//! Storage port for avatar image bytes.

use crate::user::domain::AvatarRef;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for avatar store operations.
pub type AvatarStoreResult<T> = Result<T, AvatarStoreError>;

/// Blob storage for avatar images keyed by [`AvatarRef`].
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Writes the image bytes under `avatar_ref`.
    ///
    /// Writing the same reference twice is harmless because references are
    /// derived from content.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarStoreError::Io`] when the write fails.
    async fn put(&self, avatar_ref: &AvatarRef, bytes: &[u8]) -> AvatarStoreResult<()>;

    /// Reads the image bytes, returning `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarStoreError::Io`] when the read fails.
    async fn get(&self, avatar_ref: &AvatarRef) -> AvatarStoreResult<Option<Vec<u8>>>;
}

/// Errors returned by avatar store implementations.
#[derive(Debug, Clone, Error)]
pub enum AvatarStoreError {
    /// Underlying storage failure.
    #[error("avatar storage error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl AvatarStoreError {
    /// Wraps a storage error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
