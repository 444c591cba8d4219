pub mod auth;
pub mod health;
pub mod profile;
pub mod rooms;

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::Request;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .merge(health::health_routes())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::auth_routes())
        .merge(rooms::me_routes())
        .nest("/rooms", rooms::room_routes())
        .nest("/profile", profile::profile_routes())
}

/// Span for the HTTP trace layer. Records the path only: the query string
/// may carry an `access_token`.
pub fn request_span<B>(request: &Request<B>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}

/// JSON body extractor whose rejections use the API error format.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
