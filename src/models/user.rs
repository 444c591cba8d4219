use serde::{Deserialize, Serialize};

use super::UserId;

/// Login mechanisms advertised by the register and login endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginType {
    #[serde(rename = "m.login.password")]
    Password,
    #[serde(rename = "m.login.email.identity")]
    Email,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthFlow {
    #[serde(rename = "type")]
    pub kind: LoginType,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthFlows {
    pub flows: Vec<AuthFlow>,
}

impl AuthFlows {
    /// Only password authentication is implemented.
    pub fn password_only() -> Self {
        Self {
            flows: vec![AuthFlow {
                kind: LoginType::Password,
            }],
        }
    }
}

/// Register / login request body
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    #[serde(rename = "type")]
    pub kind: LoginType,
    pub user: String,
    pub password: String,
}

/// Register / login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: UserId,
    pub access_token: String,
}

/// Public profile of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    #[serde(rename = "displayname")]
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DisplayNameRequest {
    #[serde(rename = "displayname")]
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct DisplayNameResponse {
    #[serde(rename = "displayname")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarUrlRequest {
    pub avatar_url: String,
}

#[derive(Debug, Serialize)]
pub struct AvatarUrlResponse {
    pub avatar_url: Option<String>,
}
