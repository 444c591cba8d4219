use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{
    CreateRoomResponse, MembershipResponse, PeersResponse, RoomId, RoomMembersResponse,
    RoomsResponse,
};
use crate::state::AppState;

/// Room routes
pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_room))
        .route("/{room_id}/join", post(join_room))
        .route("/{room_id}/leave", post(leave_room))
        .route("/{room_id}/members", get(room_members))
}

/// Routes scoped to the authenticated caller
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me/rooms", get(my_rooms))
        .route("/me/peers", get(my_peers))
}

/// POST /api/v1/rooms - Create a room and join the caller to it
async fn create_room(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<CreateRoomResponse>> {
    let room_id = RoomId::generate(&state.config.server_name)?;
    state.members.add_member(&room_id, &user)?;

    tracing::info!(room_id = %room_id, user_id = %user, "Room created");
    Ok(Json(CreateRoomResponse { room_id }))
}

/// POST /api/v1/rooms/:room_id/join
async fn join_room(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<String>,
) -> Result<Json<MembershipResponse>> {
    let room_id = RoomId::parse(&room_id)?;
    state.members.add_member(&room_id, &user)?;

    tracing::info!(room_id = %room_id, user_id = %user, "User joined room");
    Ok(Json(MembershipResponse {
        room_id,
        user_id: user,
    }))
}

/// POST /api/v1/rooms/:room_id/leave
async fn leave_room(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<String>,
) -> Result<Json<MembershipResponse>> {
    let room_id = RoomId::parse(&room_id)?;
    state.members.remove_member(&room_id, &user)?;

    tracing::info!(room_id = %room_id, user_id = %user, "User left room");
    Ok(Json(MembershipResponse {
        room_id,
        user_id: user,
    }))
}

/// GET /api/v1/rooms/:room_id/members - Only visible to members of the room
async fn room_members(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<String>,
) -> Result<Json<RoomMembersResponse>> {
    let room_id = RoomId::parse(&room_id)?;
    if !state.members.is_member(&room_id, &user) {
        return Err(AppError::Forbidden(format!(
            "user {} is not a member of the room {}",
            user, room_id
        )));
    }

    let members = state.members.users(&room_id);
    Ok(Json(RoomMembersResponse { room_id, members }))
}

/// GET /api/v1/me/rooms
async fn my_rooms(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Json<RoomsResponse> {
    Json(RoomsResponse {
        rooms: state.members.rooms(&user),
    })
}

/// GET /api/v1/me/peers
async fn my_peers(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Json<PeersResponse> {
    let mut peers: Vec<_> = state.members.peers(&user).into_iter().collect();
    peers.sort();
    Json(PeersResponse { peers })
}
