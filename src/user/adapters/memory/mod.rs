//! In-memory adapters for user directory tests.

mod avatar;
mod user;

pub use avatar::InMemoryAvatarStore;
pub use user::InMemoryUserRepository;
