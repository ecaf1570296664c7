//! Domain model for directed friend edges.

mod edge;
mod error;
mod ids;
mod status;

pub use edge::{FriendEdge, PersistedFriendEdgeData};
pub use error::FriendshipDomainError;
pub use ids::FriendEdgeId;
pub use status::EdgeStatus;
