//! Validated profile values: display name, email, and credential hash.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum display name length accepted by the `users.name` column.
const MAX_DISPLAY_NAME_CHARS: usize = 255;

/// Maximum email length accepted by the `users.email` column.
const MAX_EMAIL_CHARS: usize = 255;

/// Human-readable name shown on leaderboards and friend lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Creates a validated display name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyDisplayName`] when the trimmed value is
    /// empty or [`UserDomainError::DisplayNameTooLong`] when it exceeds 255
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyDisplayName);
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME_CHARS {
            return Err(UserDomainError::DisplayNameTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized, unique email address used to look users up.
///
/// Addresses are trimmed and lowercased so that uniqueness and friend
/// lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a normalized email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] unless the value contains
    /// exactly one `@` with non-empty local and domain parts and no
    /// whitespace, or [`UserDomainError::EmailTooLong`] above 255
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && parts.next().is_none()
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(UserDomainError::InvalidEmail(raw));
        }
        if normalized.chars().count() > MAX_EMAIL_CHARS {
            return Err(UserDomainError::EmailTooLong);
        }
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque credential hash produced by the authentication collaborator.
///
/// The value is never inspected here and is redacted from debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wraps a credential hash.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyCredentialHash`] for blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let hash = value.into();
        if hash.trim().is_empty() {
            return Err(UserDomainError::EmptyCredentialHash);
        }
        Ok(Self(hash))
    }

    /// Returns the stored hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(<redacted>)")
    }
}
