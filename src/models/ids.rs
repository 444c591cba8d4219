//! Validated user and room identifiers.
//!
//! Both identifiers share one grammar: a sigil (`@` for users, `!` for rooms)
//! followed by an opaque name, optionally suffixed with `:server_name`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upper bound on the encoded length of any identifier, in bytes.
pub const MAX_ID_LEN: usize = 255;

const USER_SIGIL: char = '@';
const ROOM_SIGIL: char = '!';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("identifier must start with '{0}'")]
    InvalidSigil(char),

    #[error("identifier is empty")]
    Empty,

    #[error("identifier exceeds 255 bytes")]
    TooLong,

    #[error("identifier contains an invalid character")]
    InvalidCharacter,

    #[error("identifier has an empty localpart or server name")]
    EmptyPart,
}

fn validate(raw: &str, sigil: char) -> Result<(), IdError> {
    if raw.is_empty() {
        return Err(IdError::Empty);
    }
    let body = raw.strip_prefix(sigil).ok_or(IdError::InvalidSigil(sigil))?;
    if body.is_empty() {
        return Err(IdError::Empty);
    }
    if raw.len() > MAX_ID_LEN {
        return Err(IdError::TooLong);
    }
    // ".." is the access token separator and may never appear in an identifier.
    if body.contains("..") || body.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(IdError::InvalidCharacter);
    }
    if let Some((local, server)) = body.split_once(':') {
        if local.is_empty() || server.is_empty() {
            return Err(IdError::EmptyPart);
        }
    }
    Ok(())
}

fn split_parts(raw: &str) -> (&str, Option<&str>) {
    let body = &raw[1..];
    match body.split_once(':') {
        Some((local, server)) => (local, Some(server)),
        None => (body, None),
    }
}

/// A user identifier such as `@alice:example.org`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        validate(raw, USER_SIGIL)?;
        Ok(Self(raw.to_string()))
    }

    /// Build `@localpart:server_name`, validating the result.
    pub fn from_parts(localpart: &str, server_name: &str) -> Result<Self, IdError> {
        Self::parse(&format!("{USER_SIGIL}{localpart}:{server_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn localpart(&self) -> &str {
        split_parts(&self.0).0
    }

    pub fn server_name(&self) -> Option<&str> {
        split_parts(&self.0).1
    }
}

/// A room identifier such as `!lobby:example.org`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        validate(raw, ROOM_SIGIL)?;
        Ok(Self(raw.to_string()))
    }

    /// Mint a fresh, unguessable room id on `server_name`.
    pub fn generate(server_name: &str) -> Result<Self, IdError> {
        let opaque = uuid::Uuid::new_v4().simple().to_string();
        Self::parse(&format!("{ROOM_SIGIL}{opaque}:{server_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn server_name(&self) -> Option<&str> {
        split_parts(&self.0).1
    }
}

macro_rules! string_id_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $ty {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> Self {
                id.0
            }
        }
    };
}

string_id_impls!(UserId);
string_id_impls!(RoomId);

/// Turns the textual form of a user id back into a [`UserId`].
///
/// The token codec depends on this seam rather than on [`UserId::parse`]
/// directly so that callers can swap in their own validation rules.
pub trait UserIdParser: Send + Sync {
    fn parse_user_id(&self, raw: &str) -> Result<UserId, IdError>;
}

/// Parser enforcing the grammar of [`UserId::parse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictUserIdParser;

impl UserIdParser for StrictUserIdParser {
    fn parse_user_id(&self, raw: &str) -> Result<UserId, IdError> {
        UserId::parse(raw)
    }
}
