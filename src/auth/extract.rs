use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use super::{token_from_query, TokenError};
use crate::error::AppError;
use crate::models::UserId;
use crate::state::AppState;

/// The user a request is authenticated as.
///
/// The token is read from `Authorization: Bearer` first, then from the
/// `access_token` query parameter. A missing token is rejected exactly like
/// an unrecognized one.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserId);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok();

        let token = match &header {
            Some(TypedHeader(auth)) => Some(auth.token()),
            None => parts.uri.query().and_then(token_from_query),
        }
        .ok_or(TokenError::UnknownToken)?;

        let user = state.tokens.decode(token)?;
        Ok(AuthUser(user))
    }
}
