//! Diesel schema for friend edge persistence.

diesel::table! {
    /// Directed friend edges, unique per ordered pair.
    friend_edges (id) {
        /// Edge identifier.
        id -> Uuid,
        /// Requesting or reciprocating user.
        source_id -> Uuid,
        /// Addressed user.
        target_id -> Uuid,
        /// `pending` or `accepted`.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last transition timestamp.
        updated_at -> Timestamptz,
    }
}
