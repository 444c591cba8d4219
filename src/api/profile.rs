use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::ApiJson;
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{
    AvatarUrlRequest, AvatarUrlResponse, DisplayNameRequest, DisplayNameResponse, UserId,
};
use crate::state::AppState;

/// Profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/{user_id}/displayname", get(get_display_name).put(set_display_name))
        .route("/{user_id}/avatar_url", get(get_avatar_url).put(set_avatar_url))
}

/// Parse the path user id and check the account exists.
fn user_from_path(state: &AppState, raw: &str) -> Result<UserId> {
    let user = UserId::parse(raw)?;
    state.users.user_exists(&user)?;
    Ok(user)
}

/// GET /api/v1/profile/:user_id/displayname
async fn get_display_name(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DisplayNameResponse>> {
    let user = user_from_path(&state, &user_id)?;
    let profile = state.users.profile(&user)?;
    Ok(Json(DisplayNameResponse {
        display_name: profile.display_name,
    }))
}

/// PUT /api/v1/profile/:user_id/displayname
async fn set_display_name(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
    ApiJson(request): ApiJson<DisplayNameRequest>,
) -> Result<Json<serde_json::Value>> {
    let user = user_from_path(&state, &user_id)?;
    state
        .users
        .set_display_name(&user, request.display_name, &caller)?;
    Ok(Json(serde_json::json!({})))
}

/// GET /api/v1/profile/:user_id/avatar_url
async fn get_avatar_url(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AvatarUrlResponse>> {
    let user = user_from_path(&state, &user_id)?;
    let profile = state.users.profile(&user)?;
    Ok(Json(AvatarUrlResponse {
        avatar_url: profile.avatar_url,
    }))
}

/// PUT /api/v1/profile/:user_id/avatar_url
async fn set_avatar_url(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
    ApiJson(request): ApiJson<AvatarUrlRequest>,
) -> Result<Json<serde_json::Value>> {
    let user = user_from_path(&state, &user_id)?;
    state
        .users
        .set_avatar_url(&user, request.avatar_url, &caller)?;
    Ok(Json(serde_json::json!({})))
}
