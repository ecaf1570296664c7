//! Error types for leaderboard input parsing.

use thiserror::Error;

/// Errors returned while parsing leaderboard parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeaderboardDomainError {
    /// The scope selector is neither `global` nor `friends`.
    #[error("unknown leaderboard scope '{0}'")]
    UnknownScope(String),
}
