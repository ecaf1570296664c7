//! Application services for the user directory.

mod avatar;
mod directory;

pub use avatar::{AvatarService, AvatarServiceError, AvatarServiceResult, UploadAvatarRequest};
pub use directory::{
    RegisterUserRequest, UpdateProfileRequest, UserDirectoryError, UserDirectoryResult,
    UserDirectoryService,
};
