//! Domain types for leaderboard ranking.

mod entry;
mod error;
mod scope;

pub use entry::{LeaderboardEntry, rank};
pub use error::LeaderboardDomainError;
pub use scope::LeaderboardScope;
