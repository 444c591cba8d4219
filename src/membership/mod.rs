pub mod directory;

pub use directory::MembershipDirectory;

use std::collections::HashSet;

use crate::models::{RoomId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MembershipError {
    #[error("user {user} is already a member of the room {room}")]
    AlreadyMember { room: RoomId, user: UserId },

    #[error("user {user} is not a member of the room {room}")]
    NotMember { room: RoomId, user: UserId },
}

/// Authoritative room <-> user membership.
///
/// `rooms` and `users` return unordered sequences: their order may change
/// after any mutation. Unknown users and rooms yield empty results.
pub trait MembershipStore: Send + Sync {
    fn add_member(&self, room: &RoomId, user: &UserId) -> Result<(), MembershipError>;

    fn remove_member(&self, room: &RoomId, user: &UserId) -> Result<(), MembershipError>;

    fn rooms(&self, user: &UserId) -> Vec<RoomId>;

    fn users(&self, room: &RoomId) -> Vec<UserId>;

    /// Every user sharing at least one room with `user`, `user` included.
    fn peers(&self, user: &UserId) -> HashSet<UserId>;

    fn is_member(&self, room: &RoomId, user: &UserId) -> bool;
}
