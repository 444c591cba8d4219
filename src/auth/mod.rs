//! Stateless bearer tokens.
//!
//! A token is `base64url(user_id) + ".." + nonce`. The server keeps no copy;
//! decoding the token is the only way a request is tied to a user. The nonce
//! only varies the bytes between issuances and is never checked.

pub mod extract;

pub use extract::AuthUser;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::models::{StrictUserIdParser, UserId, UserIdParser};
use crate::security::random_string;

/// Separator between the encoded user id and the nonce.
pub const TOKEN_SEPARATOR: &str = "..";

/// Length of the random suffix appended to every token.
pub const NONCE_LEN: usize = 16;

/// Every decode failure maps to this one error so callers cannot tell
/// a malformed token from a bad encoding or an invalid user id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Unrecognized access token")]
    UnknownToken,
}

/// Source of unpredictable strings for token nonces.
pub trait NonceSource: Send + Sync {
    fn random_string(&self, len: usize) -> String;
}

/// Nonces drawn from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngNonce;

impl NonceSource for ThreadRngNonce {
    fn random_string(&self, len: usize) -> String {
        random_string(len)
    }
}

/// Encodes user ids into access tokens and back.
#[derive(Debug, Clone, Default)]
pub struct TokenCodec<N = ThreadRngNonce, P = StrictUserIdParser> {
    nonces: N,
    parser: P,
}

impl TokenCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: NonceSource, P: UserIdParser> TokenCodec<N, P> {
    pub fn with_parts(nonces: N, parser: P) -> Self {
        Self { nonces, parser }
    }

    /// Issue a fresh token for `user`. Never fails.
    pub fn encode(&self, user: &UserId) -> String {
        let encoded = URL_SAFE_NO_PAD.encode(user.as_str().as_bytes());
        format!(
            "{}{}{}",
            encoded,
            TOKEN_SEPARATOR,
            self.nonces.random_string(NONCE_LEN)
        )
    }

    /// Recover the user a token was issued for.
    pub fn decode(&self, token: &str) -> Result<UserId, TokenError> {
        let mut parts = token.split(TOKEN_SEPARATOR);
        let (Some(encoded), Some(_nonce), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::UnknownToken);
        };

        let raw = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| TokenError::UnknownToken)?;
        let raw = String::from_utf8(raw).map_err(|_| TokenError::UnknownToken)?;

        self.parser
            .parse_user_id(&raw)
            .map_err(|_| TokenError::UnknownToken)
    }
}

/// Extract the access token from a query string: "access_token=xxx"
pub fn token_from_query(query: &str) -> Option<&str> {
    query.split('&').find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some("access_token"), Some(value)) if !value.is_empty() => Some(value),
            _ => None,
        }
    })
}
