//! User accounts: credentials and profile data.

pub mod store;

pub use store::InMemoryUserStore;

use std::sync::{Arc, LazyLock};

use crate::models::{UserId, UserProfile};
use crate::security::{hash_password, verify_password};

/// Checked against when an account has no usable hash, so failed logins
/// cost the same whether or not the user exists.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("roomgate-unused-password").ok());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("user {0} is already in use")]
    UserInUse(UserId),

    #[error("user {0} does not exist")]
    UnknownUser(UserId),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

/// Storage for accounts and their profiles.
pub trait UserStore: Send + Sync {
    fn create_user(&self, user: &UserId) -> Result<(), UserError>;

    fn user_exists(&self, user: &UserId) -> Result<(), UserError>;

    fn password_hash(&self, user: &UserId) -> Result<Option<String>, UserError>;

    fn set_password_hash(&self, user: &UserId, hash: String) -> Result<(), UserError>;

    fn profile(&self, user: &UserId) -> Result<UserProfile, UserError>;

    fn set_display_name(&self, user: &UserId, display_name: String) -> Result<(), UserError>;

    fn set_avatar_url(&self, user: &UserId, avatar_url: String) -> Result<(), UserError>;
}

/// Account operations on top of a [`UserStore`].
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create `user` with `password`.
    pub fn register(&self, user: &UserId, password: &str) -> Result<(), UserError> {
        self.store.create_user(user)?;
        self.set_password(user, password)
    }

    pub fn user_exists(&self, user: &UserId) -> Result<(), UserError> {
        self.store.user_exists(user)
    }

    /// Unknown users and wrong passwords are reported identically.
    pub fn verify_password(&self, user: &UserId, password: &str) -> Result<(), UserError> {
        let stored = match self.store.password_hash(user) {
            Ok(Some(hash)) => hash,
            Ok(None) | Err(UserError::UnknownUser(_)) => {
                if let Some(dummy) = DUMMY_HASH.as_deref() {
                    let _ = verify_password(password, dummy);
                }
                return Err(UserError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };
        if !verify_password(password, &stored) {
            return Err(UserError::InvalidCredentials);
        }
        Ok(())
    }

    pub fn set_password(&self, user: &UserId, password: &str) -> Result<(), UserError> {
        let hash = hash_password(password).map_err(|e| UserError::PasswordHash(e.to_string()))?;
        self.store.set_password_hash(user, hash)
    }

    pub fn profile(&self, user: &UserId) -> Result<UserProfile, UserError> {
        self.store.profile(user)
    }

    pub fn set_display_name(
        &self,
        user: &UserId,
        display_name: String,
        done_by: &UserId,
    ) -> Result<(), UserError> {
        if user != done_by {
            return Err(UserError::Forbidden(
                "can't change the display name of other users".to_string(),
            ));
        }
        self.store.set_display_name(user, display_name)
    }

    pub fn set_avatar_url(
        &self,
        user: &UserId,
        avatar_url: String,
        done_by: &UserId,
    ) -> Result<(), UserError> {
        if user != done_by {
            return Err(UserError::Forbidden(
                "can't change the avatar of other users".to_string(),
            ));
        }
        self.store.set_avatar_url(user, avatar_url)
    }
}
