//! User aggregate root.

use super::{AvatarRef, CredentialHash, DisplayName, EmailAddress, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Registered user.
///
/// The point balance is only ever raised by the repository's atomic
/// increment; the aggregate exposes no setter for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: DisplayName,
    email: EmailAddress,
    credential_hash: CredentialHash,
    avatar_ref: Option<AvatarRef>,
    points: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: DisplayName,
    /// Persisted unique email.
    pub email: EmailAddress,
    /// Persisted credential hash.
    pub credential_hash: CredentialHash,
    /// Persisted avatar reference, if any.
    pub avatar_ref: Option<AvatarRef>,
    /// Persisted point balance.
    pub points: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last profile edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Column-scoped profile edit.
///
/// Only present fields are written, so concurrent edits to different
/// columns do not overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChanges {
    /// New display name.
    pub name: Option<DisplayName>,
    /// New email address.
    pub email: Option<EmailAddress>,
    /// New avatar reference.
    pub avatar_ref: Option<AvatarRef>,
    /// Edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProfileChanges {
    /// Creates an empty edit stamped with the clock's current time.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            name: None,
            email: None,
            avatar_ref: None,
            updated_at: clock.utc(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: DisplayName) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: EmailAddress) -> Self {
        self.email = Some(email);
        self
    }

    /// Sets the avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar_ref: AvatarRef) -> Self {
        self.avatar_ref = Some(avatar_ref);
        self
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.avatar_ref.is_none()
    }
}

impl User {
    /// Creates a newly registered user with a zero point balance.
    #[must_use]
    pub fn register(
        name: DisplayName,
        email: EmailAddress,
        credential_hash: CredentialHash,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            name,
            email,
            credential_hash,
            avatar_ref: None,
            points: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            credential_hash: data.credential_hash,
            avatar_ref: data.avatar_ref,
            points: data.points,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Returns the unique email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the credential hash.
    #[must_use]
    pub const fn credential_hash(&self) -> &CredentialHash {
        &self.credential_hash
    }

    /// Returns the avatar reference, if one has been uploaded.
    #[must_use]
    pub const fn avatar_ref(&self) -> Option<&AvatarRef> {
        self.avatar_ref.as_ref()
    }

    /// Returns the point balance.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last profile edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrites the fields present in `changes`.
    pub fn apply(&mut self, changes: &ProfileChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(avatar_ref) = &changes.avatar_ref {
            self.avatar_ref = Some(avatar_ref.clone());
        }
        self.updated_at = changes.updated_at;
    }
}
