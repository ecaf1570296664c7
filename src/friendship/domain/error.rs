//! Error types for friendship domain validation.

use crate::user::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing friend edges.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FriendshipDomainError {
    /// A user tried to befriend themselves.
    #[error("user {0} cannot send a friend request to themselves")]
    SelfRequest(UserId),

    /// The stored edge status is not recognized.
    #[error("unknown friend edge status '{0}'")]
    UnknownStatus(String),
}
