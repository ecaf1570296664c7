//! Validated scalar fields of a task: title and deadline.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum deadline length accepted by the `tasks.deadline` column.
const MAX_DEADLINE_CHARS: usize = 64;

/// Naive date-time layouts accepted for deadlines, interpreted as UTC.
const NAIVE_DEADLINE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the trimmed value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match.
    #[must_use]
    pub fn contains_ignore_case(&self, query: &str) -> bool {
        self.0.to_lowercase().contains(&query.to_lowercase())
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task deadline as supplied by the client.
///
/// The original text is stored unchanged (after trimming). [`Self::as_utc`]
/// interprets it for scheduling; text that matches no known layout is still a
/// valid deadline but is never due.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(String);

impl Deadline {
    /// Creates a validated deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDeadline`] for blank values or
    /// [`TaskDomainError::DeadlineTooLong`] above 64 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyDeadline);
        }
        if trimmed.chars().count() > MAX_DEADLINE_CHARS {
            return Err(TaskDomainError::DeadlineTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the deadline text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interprets the deadline as a UTC instant.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM:SS`, and
    /// `YYYY-MM-DD` (midnight). Naive values are read as UTC.
    #[must_use]
    pub fn as_utc(&self) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(parsed.with_timezone(&Utc));
        }
        NAIVE_DEADLINE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&self.0, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(&self.0, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc())
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
