//! Content-addressed avatar references.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a lowercase hex SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Image formats accepted for avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarExtension {
    /// Portable Network Graphics.
    Png,
    /// JPEG, stored with the `jpg` extension.
    Jpg,
    /// Graphics Interchange Format.
    Gif,
    /// `WebP` image.
    Webp,
}

impl AvatarExtension {
    /// Returns the canonical file extension.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

impl TryFrom<&str> for AvatarExtension {
    type Error = UserDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "gif" => Ok(Self::Gif),
            "webp" => Ok(Self::Webp),
            _ => Err(UserDomainError::UnsupportedAvatarExtension(value.to_owned())),
        }
    }
}

/// Storage key for an avatar image: `<sha256-hex>.<extension>`.
///
/// Identical image content always maps to the same reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvatarRef(String);

impl AvatarRef {
    /// Derives the reference for the given image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyAvatar`] when `bytes` is empty.
    pub fn for_content(bytes: &[u8], extension: AvatarExtension) -> Result<Self, UserDomainError> {
        if bytes.is_empty() {
            return Err(UserDomainError::EmptyAvatar);
        }
        let digest = Sha256::digest(bytes);
        Ok(Self(format!("{digest:x}.{}", extension.as_str())))
    }

    /// Validates a reference read back from persistence.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::MalformedAvatarRef`] when the value is not a
    /// hex digest followed by a supported extension.
    pub fn parse(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let Some((digest, extension)) = raw.split_once('.') else {
            return Err(UserDomainError::MalformedAvatarRef(raw));
        };
        let digest_ok = digest.len() == DIGEST_HEX_LEN
            && digest
                .chars()
                .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch));
        let extension_ok = AvatarExtension::try_from(extension)
            .is_ok_and(|parsed| parsed.as_str() == extension);
        if !digest_ok || !extension_ok {
            return Err(UserDomainError::MalformedAvatarRef(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the reference, which doubles as the stored file name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AvatarRef {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AvatarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
