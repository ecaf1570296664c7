//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task deadline is empty after trimming.
    #[error("task deadline must not be empty")]
    EmptyDeadline,

    /// The deadline exceeds the storage limit.
    #[error("task deadline exceeds 64 character limit")]
    DeadlineTooLong,

    /// The priority is not one of `low`, `medium`, or `high`.
    #[error("unknown task priority '{0}', expected low, medium, or high")]
    UnknownPriority(String),

    /// The status is not one of `Pending` or `Completed`.
    #[error("unknown task status '{0}', expected Pending or Completed")]
    UnknownStatus(String),
}
