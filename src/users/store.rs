use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{UserError, UserStore};
use crate::models::{UserId, UserProfile};

struct UserRecord {
    password_hash: Option<String>,
    profile: UserProfile,
}

/// Process-lifetime account store.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: DashMap<UserId, UserRecord>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.users.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn update<F>(&self, user: &UserId, f: F) -> Result<(), UserError>
    where
        F: FnOnce(&mut UserRecord),
    {
        let mut record = self
            .users
            .get_mut(user)
            .ok_or_else(|| UserError::UnknownUser(user.clone()))?;
        f(record.value_mut());
        Ok(())
    }
}

impl UserStore for InMemoryUserStore {
    fn create_user(&self, user: &UserId) -> Result<(), UserError> {
        match self.users.entry(user.clone()) {
            Entry::Occupied(_) => Err(UserError::UserInUse(user.clone())),
            Entry::Vacant(slot) => {
                slot.insert(UserRecord {
                    password_hash: None,
                    profile: UserProfile {
                        display_name: Some(user.localpart().to_string()),
                        avatar_url: None,
                    },
                });
                tracing::info!(user_id = %user, "User created");
                Ok(())
            }
        }
    }

    fn user_exists(&self, user: &UserId) -> Result<(), UserError> {
        if self.users.contains_key(user) {
            Ok(())
        } else {
            Err(UserError::UnknownUser(user.clone()))
        }
    }

    fn password_hash(&self, user: &UserId) -> Result<Option<String>, UserError> {
        self.users
            .get(user)
            .map(|record| record.password_hash.clone())
            .ok_or_else(|| UserError::UnknownUser(user.clone()))
    }

    fn set_password_hash(&self, user: &UserId, hash: String) -> Result<(), UserError> {
        self.update(user, |record| record.password_hash = Some(hash))
    }

    fn profile(&self, user: &UserId) -> Result<UserProfile, UserError> {
        self.users
            .get(user)
            .map(|record| record.profile.clone())
            .ok_or_else(|| UserError::UnknownUser(user.clone()))
    }

    fn set_display_name(&self, user: &UserId, display_name: String) -> Result<(), UserError> {
        self.update(user, |record| record.profile.display_name = Some(display_name))
    }

    fn set_avatar_url(&self, user: &UserId, avatar_url: String) -> Result<(), UserError> {
        self.update(user, |record| record.profile.avatar_url = Some(avatar_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_defaults_display_name() {
        let store = InMemoryUserStore::new();
        let bob = UserId::parse("@bob:chat.local").unwrap();
        store.create_user(&bob).expect("Should create user");

        let profile = store.profile(&bob).unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("bob"));
        assert_eq!(profile.avatar_url, None);
        assert_eq!(store.password_hash(&bob).unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_user_errors() {
        let store = InMemoryUserStore::new();
        let ghost = UserId::parse("@ghost").unwrap();

        assert_eq!(
            store.user_exists(&ghost),
            Err(UserError::UnknownUser(ghost.clone()))
        );
        assert!(store.profile(&ghost).is_err());
        assert!(store.set_display_name(&ghost, "x".to_string()).is_err());
        assert!(store.is_empty());
    }
}
