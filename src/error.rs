use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::auth::TokenError;
use crate::membership::MembershipError;
use crate::models::IdError;
use crate::users::UserError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error(transparent)]
    User(#[from] UserError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::Token(_) => StatusCode::UNAUTHORIZED,
            AppError::Membership(MembershipError::AlreadyMember { .. }) => StatusCode::CONFLICT,
            AppError::Membership(MembershipError::NotMember { .. }) => StatusCode::FORBIDDEN,
            AppError::User(UserError::UserInUse(_)) => StatusCode::BAD_REQUEST,
            AppError::User(UserError::UnknownUser(_)) => StatusCode::NOT_FOUND,
            AppError::User(UserError::InvalidCredentials | UserError::Forbidden(_)) => {
                StatusCode::FORBIDDEN
            }
            AppError::User(UserError::PasswordHash(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
