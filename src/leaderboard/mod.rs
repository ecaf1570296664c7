//! Leaderboard aggregation.
//!
//! Ranks a population of users by how many tasks they have completed. The
//! population is every registered user (`global`) or the viewer's accepted
//! friends (`friends`). Aggregation is read-only.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
