//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Deadline text.
    pub deadline: String,
    /// Priority label.
    pub priority: String,
    /// Status label.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Deadline text.
    pub deadline: String,
    /// Priority label.
    pub priority: String,
    /// Status label.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` writes `NULL`.
    pub description: Option<Option<String>>,
    /// New deadline text.
    pub deadline: Option<String>,
    /// New priority label.
    pub priority: Option<String>,
    /// New status label.
    pub status: Option<String>,
    /// Edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Per-owner tally returned by the completion count query.
#[derive(Debug, Clone, QueryableByName)]
pub struct CompletionCountRow {
    /// Owning user.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub owner_id: uuid::Uuid,
    /// Tasks marked completed.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub completed: i64,
    /// Tasks in any other status.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub incomplete: i64,
}
