//! Embedded SQL for the `PostgreSQL` schema.

/// Creates the `users`, `tasks`, and `friend_edges` tables.
pub const CREATE_TABLES_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_taskmate_tables/up.sql");

/// Drops every table created by [`CREATE_TABLES_SQL`].
pub const DROP_TABLES_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_taskmate_tables/down.sql");
