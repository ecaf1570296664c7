//! Unit tests for leaderboard aggregation.
