//! Application services for leaderboard aggregation.

mod aggregator;

pub use aggregator::{LeaderboardError, LeaderboardResult, LeaderboardService};
