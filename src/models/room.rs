use serde::Serialize;

use super::{RoomId, UserId};

/// Response after creating a room
#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    pub room_id: RoomId,
}

/// Response after joining or leaving a room
#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub room_id: RoomId,
    pub user_id: UserId,
}

/// Members of a room. Order is unspecified.
#[derive(Debug, Serialize)]
pub struct RoomMembersResponse {
    pub room_id: RoomId,
    pub members: Vec<UserId>,
}

/// Rooms the caller belongs to. Order is unspecified.
#[derive(Debug, Serialize)]
pub struct RoomsResponse {
    pub rooms: Vec<RoomId>,
}

/// Users sharing at least one room with the caller, sorted.
#[derive(Debug, Serialize)]
pub struct PeersResponse {
    pub peers: Vec<UserId>,
}
