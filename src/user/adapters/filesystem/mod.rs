//! Filesystem adapters for user directory ports.

mod avatar;

pub use avatar::FilesystemAvatarStore;
