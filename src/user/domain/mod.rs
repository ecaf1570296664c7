//! Domain model for registered users.

mod avatar;
mod error;
mod ids;
mod profile;
mod user;

pub use avatar::{AvatarExtension, AvatarRef};
pub use error::UserDomainError;
pub use ids::UserId;
pub use profile::{CredentialHash, DisplayName, EmailAddress};
pub use user::{PersistedUserData, ProfileChanges, User};
