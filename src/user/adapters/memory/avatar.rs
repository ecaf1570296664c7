//! In-memory avatar store for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::AvatarRef,
    ports::{AvatarStore, AvatarStoreError, AvatarStoreResult},
};

/// Thread-safe in-memory avatar blob store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvatarStore {
    blobs: Arc<RwLock<HashMap<AvatarRef, Vec<u8>>>>,
}

impl InMemoryAvatarStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct stored images.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarStoreError::Io`] when the lock is poisoned.
    pub fn len(&self) -> AvatarStoreResult<usize> {
        let blobs = self
            .blobs
            .read()
            .map_err(|err| AvatarStoreError::io(std::io::Error::other(err.to_string())))?;
        Ok(blobs.len())
    }
}

#[async_trait]
impl AvatarStore for InMemoryAvatarStore {
    async fn put(&self, avatar_ref: &AvatarRef, bytes: &[u8]) -> AvatarStoreResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|err| AvatarStoreError::io(std::io::Error::other(err.to_string())))?;
        blobs.insert(avatar_ref.clone(), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, avatar_ref: &AvatarRef) -> AvatarStoreResult<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|err| AvatarStoreError::io(std::io::Error::other(err.to_string())))?;
        Ok(blobs.get(avatar_ref).cloned())
    }
}
