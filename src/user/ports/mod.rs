//! Port contracts for the user directory.
//!
//! Ports define infrastructure-agnostic interfaces used by user services.

pub mod avatar_store;
pub mod repository;

pub use avatar_store::{AvatarStore, AvatarStoreError, AvatarStoreResult};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
