//! Capability-scoped filesystem avatar store.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::sync::Arc;

use crate::config::TaskmateConfig;
use crate::user::{
    domain::AvatarRef,
    ports::{AvatarStore, AvatarStoreError, AvatarStoreResult},
};

/// Avatar store writing one file per reference inside a single directory.
///
/// All access goes through a `cap-std` directory handle, so references can
/// never escape the configured root.
#[derive(Debug, Clone)]
pub struct FilesystemAvatarStore {
    root: Arc<Dir>,
}

impl FilesystemAvatarStore {
    /// Opens (creating if needed) the avatar directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarStoreError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Utf8Path) -> AvatarStoreResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(AvatarStoreError::io)?;
        let root = Dir::open_ambient_dir(path, ambient_authority()).map_err(AvatarStoreError::io)?;
        Ok(Self {
            root: Arc::new(root),
        })
    }

    /// Opens the configured avatar directory, if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarStoreError::Io`] when the configured directory cannot
    /// be created or opened.
    pub fn from_config(config: &TaskmateConfig) -> AvatarStoreResult<Option<Self>> {
        config.avatar_dir.as_deref().map(Self::open).transpose()
    }

    async fn run_blocking<F, T>(&self, f: F) -> AvatarStoreResult<T>
    where
        F: FnOnce(&Dir) -> AvatarStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || f(&root))
            .await
            .map_err(AvatarStoreError::io)?
    }
}

#[async_trait]
impl AvatarStore for FilesystemAvatarStore {
    async fn put(&self, avatar_ref: &AvatarRef, bytes: &[u8]) -> AvatarStoreResult<()> {
        let file_name = avatar_ref.as_str().to_owned();
        let contents = bytes.to_vec();
        self.run_blocking(move |root| {
            if root.exists(&file_name) {
                return Ok(());
            }
            root.write(&file_name, contents).map_err(AvatarStoreError::io)
        })
        .await
    }

    async fn get(&self, avatar_ref: &AvatarRef) -> AvatarStoreResult<Option<Vec<u8>>> {
        let file_name = avatar_ref.as_str().to_owned();
        self.run_blocking(move |root| match root.read(&file_name) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AvatarStoreError::io(err)),
        })
        .await
    }
}
