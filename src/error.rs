//! Caller-facing error classification shared by every service.
//!
//! Each bounded context keeps its own `thiserror` enums; this module maps
//! them onto the four categories callers act on.

use std::fmt;

/// Broad category of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed input the caller can correct.
    Validation,
    /// A referenced user or pending request does not exist.
    NotFound,
    /// A uniqueness constraint rejected the write.
    Conflict,
    /// The persistence layer failed.
    Storage,
}

impl ErrorKind {
    /// Returns a stable machine-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message returned to callers in place of storage failure details.
pub const STORAGE_FAILURE_MESSAGE: &str = "internal storage error";

/// Maps a service error onto [`ErrorKind`].
pub trait Classify: std::error::Error {
    /// Returns the category of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a message safe to show to the caller.
    ///
    /// Storage failures are reported generically; every other kind carries
    /// enough detail to correct the input.
    fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Storage => STORAGE_FAILURE_MESSAGE.to_owned(),
            ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::Conflict => self.to_string(),
        }
    }
}
