//! In-memory adapters for friendship tests.

mod edge;

pub use edge::InMemoryFriendEdgeRepository;
