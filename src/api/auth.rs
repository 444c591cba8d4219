use axum::{extract::State, routing::get, Json, Router};

use super::ApiJson;
use crate::error::{AppError, Result};
use crate::models::{AuthFlows, AuthRequest, AuthResponse, LoginType, UserId};
use crate::state::AppState;

/// Registration and login routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth_flows).post(register))
        .route("/login", get(auth_flows).post(login))
}

/// GET /api/v1/register, GET /api/v1/login - Supported flows
async fn auth_flows() -> Json<AuthFlows> {
    Json(AuthFlows::password_only())
}

fn validate_credentials(request: &AuthRequest) -> Result<()> {
    if request.kind != LoginType::Password {
        return Err(AppError::BadRequest(format!(
            "Unsupported login type: {:?}",
            request.kind
        )));
    }
    if request.user.is_empty() {
        return Err(AppError::BadRequest("Missing or invalid user".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::BadRequest("Missing or invalid password".to_string()));
    }
    Ok(())
}

/// POST /api/v1/register - Create an account and issue a token
async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AuthRequest>,
) -> Result<Json<AuthResponse>> {
    validate_credentials(&request)?;
    if request.user.contains(':') || request.user.starts_with('@') {
        return Err(AppError::BadRequest("Missing or invalid user".to_string()));
    }

    let user_id = UserId::from_parts(&request.user, &state.config.server_name)?;
    state.users.register(&user_id, &request.password)?;

    let access_token = state.tokens.encode(&user_id);
    tracing::info!(user_id = %user_id, "User registered");

    Ok(Json(AuthResponse {
        user_id,
        access_token,
    }))
}

/// POST /api/v1/login - Verify a password and issue a token
async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AuthRequest>,
) -> Result<Json<AuthResponse>> {
    validate_credentials(&request)?;

    // Accept either a full user id or a bare localpart on this server.
    let user_id = if request.user.starts_with('@') {
        UserId::parse(&request.user)?
    } else {
        UserId::from_parts(&request.user, &state.config.server_name)?
    };
    state.users.verify_password(&user_id, &request.password)?;

    let access_token = state.tokens.encode(&user_id);
    tracing::info!(user_id = %user_id, "User logged in");

    Ok(Json(AuthResponse {
        user_id,
        access_token,
    }))
}
