//! Diesel schema for task persistence.

diesel::table! {
    /// Owner-scoped to-do items.
    tasks (id) {
        /// Time-ordered task identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Non-blank title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Deadline text as supplied by the client.
        #[max_length = 64]
        deadline -> Varchar,
        /// `low`, `medium`, or `high`.
        #[max_length = 16]
        priority -> Varchar,
        /// `Pending` or `Completed`.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}
