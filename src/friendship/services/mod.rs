//! Application services for the friend request protocol.

mod friendship;

pub use friendship::{FriendRequestOutcome, FriendshipError, FriendshipResult, FriendshipService};
