//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users and their point balances.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Normalized unique email.
        #[max_length = 255]
        email -> Varchar,
        /// Credential hash supplied by the authentication collaborator.
        credential_hash -> Text,
        /// Optional content-addressed avatar reference.
        #[max_length = 255]
        avatar_ref -> Nullable<Varchar>,
        /// Non-negative point balance.
        points -> Int8,
        /// Registration timestamp.
        created_at -> Timestamptz,
        /// Last profile edit timestamp.
        updated_at -> Timestamptz,
    }
}
