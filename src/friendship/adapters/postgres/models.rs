//! Diesel row models for friend edges.

use super::schema::friend_edges;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for friend edges.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = friend_edges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FriendEdgeRow {
    /// Edge identifier.
    pub id: uuid::Uuid,
    /// Source user.
    pub source_id: uuid::Uuid,
    /// Target user.
    pub target_id: uuid::Uuid,
    /// Status label.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last transition timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for friend edges.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = friend_edges)]
pub struct NewFriendEdgeRow {
    /// Edge identifier.
    pub id: uuid::Uuid,
    /// Source user.
    pub source_id: uuid::Uuid,
    /// Target user.
    pub target_id: uuid::Uuid,
    /// Status label.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last transition timestamp.
    pub updated_at: DateTime<Utc>,
}
