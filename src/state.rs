use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::config::Config;
use crate::membership::{MembershipDirectory, MembershipStore};
use crate::users::{InMemoryUserStore, UserService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tokens: Arc<TokenCodec>,
    pub members: Arc<dyn MembershipStore>,
    pub users: UserService,
}

impl AppState {
    pub fn new(
        config: Config,
        tokens: TokenCodec,
        members: Arc<dyn MembershipStore>,
        users: UserService,
    ) -> Self {
        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            members,
            users,
        }
    }

    /// State backed by the in-memory directory and account store.
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            TokenCodec::new(),
            Arc::new(MembershipDirectory::new()),
            UserService::new(Arc::new(InMemoryUserStore::new())),
        )
    }
}
