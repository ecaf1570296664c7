//! Port contracts for friend edge persistence.

mod repository;

pub use repository::{FriendEdgeRepository, FriendEdgeRepositoryError, FriendEdgeRepositoryResult};
