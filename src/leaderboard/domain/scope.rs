//! Leaderboard population selector.

use super::LeaderboardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Population a leaderboard is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardScope {
    /// Every registered user.
    #[default]
    Global,
    /// Users the viewer has an accepted friend edge to.
    Friends,
}

impl LeaderboardScope {
    /// Returns the selector label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Friends => "friends",
        }
    }
}

impl fmt::Display for LeaderboardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LeaderboardScope {
    type Error = LeaderboardDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "friends" => Ok(Self::Friends),
            _ => Err(LeaderboardDomainError::UnknownScope(value.to_owned())),
        }
    }
}
