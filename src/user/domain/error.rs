//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The display name exceeds the storage limit.
    #[error("display name exceeds 255 character limit")]
    DisplayNameTooLong,

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The email address exceeds the storage limit.
    #[error("email address exceeds 255 character limit")]
    EmailTooLong,

    /// The credential hash is empty.
    #[error("credential hash must not be empty")]
    EmptyCredentialHash,

    /// An avatar upload carried no bytes.
    #[error("avatar image must not be empty")]
    EmptyAvatar,

    /// The avatar file extension is not an accepted image type.
    #[error("unsupported avatar extension '{0}'")]
    UnsupportedAvatarExtension(String),

    /// A persisted avatar reference is malformed.
    #[error("malformed avatar reference '{0}'")]
    MalformedAvatarRef(String),
}
