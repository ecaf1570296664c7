//! `PostgreSQL` adapters for friend edge persistence.

mod models;
mod repository;
mod schema;

pub use repository::{FriendEdgePgPool, PostgresFriendEdgeRepository};
