//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Normalized email.
    pub email: String,
    /// Credential hash.
    pub credential_hash: String,
    /// Avatar reference.
    pub avatar_ref: Option<String>,
    /// Point balance.
    pub points: i64,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last profile edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Normalized email.
    pub email: String,
    /// Credential hash.
    pub credential_hash: String,
    /// Avatar reference.
    pub avatar_ref: Option<String>,
    /// Point balance.
    pub points: i64,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last profile edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset written by profile edits; `None` columns are skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserProfileChangeset {
    /// Display name.
    pub name: Option<String>,
    /// Normalized email.
    pub email: Option<String>,
    /// Avatar reference.
    pub avatar_ref: Option<String>,
    /// Last profile edit timestamp.
    pub updated_at: DateTime<Utc>,
}
