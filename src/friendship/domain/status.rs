//! Friend edge status.

use super::FriendshipDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of one directed friend edge.
///
/// The only transition is `pending -> accepted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    /// Request sent, not yet accepted.
    Pending,
    /// Friendship established in this direction.
    Accepted,
}

impl EdgeStatus {
    /// Returns the storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

impl fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EdgeStatus {
    type Error = FriendshipDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            _ => Err(FriendshipDomainError::UnknownStatus(value.to_owned())),
        }
    }
}
