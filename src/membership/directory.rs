use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use super::{MembershipError, MembershipStore};
use crate::models::{RoomId, UserId};

/// In-memory membership directory.
///
/// The pair set and both indices sit behind a single lock, taken once per
/// call and never held while calling out of this type.
#[derive(Default)]
pub struct MembershipDirectory {
    inner: RwLock<Indices>,
}

#[derive(Default)]
struct Indices {
    members: HashSet<(RoomId, UserId)>,
    users: HashMap<RoomId, Vec<UserId>>,
    rooms: HashMap<UserId, Vec<RoomId>>,
}

/// Swap-removes `target` from the vector at `key`, dropping the entry once empty.
fn unlink<K, V>(index: &mut HashMap<K, Vec<V>>, key: &K, target: &V)
where
    K: std::hash::Hash + Eq,
    V: PartialEq,
{
    if let Some(values) = index.get_mut(key) {
        if let Some(pos) = values.iter().position(|v| v == target) {
            values.swap_remove(pos);
        }
        if values.is_empty() {
            index.remove(key);
        }
    }
}

impl MembershipDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of membership pairs.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.read().members.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.inner.read().members.is_empty()
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        let inner = self.inner.read();
        let from_users: usize = inner.users.values().map(Vec::len).sum();
        let from_rooms: usize = inner.rooms.values().map(Vec::len).sum();
        assert_eq!(from_users, inner.members.len());
        assert_eq!(from_rooms, inner.members.len());
        for (room, users) in &inner.users {
            for user in users {
                assert!(inner.members.contains(&(room.clone(), user.clone())));
                assert!(inner.rooms[user].contains(room));
            }
        }
    }
}

impl MembershipStore for MembershipDirectory {
    fn add_member(&self, room: &RoomId, user: &UserId) -> Result<(), MembershipError> {
        let mut inner = self.inner.write();
        if !inner.members.insert((room.clone(), user.clone())) {
            return Err(MembershipError::AlreadyMember {
                room: room.clone(),
                user: user.clone(),
            });
        }
        inner.users.entry(room.clone()).or_default().push(user.clone());
        inner.rooms.entry(user.clone()).or_default().push(room.clone());
        drop(inner);

        tracing::debug!(room_id = %room, user_id = %user, "Member added");
        Ok(())
    }

    fn remove_member(&self, room: &RoomId, user: &UserId) -> Result<(), MembershipError> {
        let mut inner = self.inner.write();
        if !inner.members.remove(&(room.clone(), user.clone())) {
            return Err(MembershipError::NotMember {
                room: room.clone(),
                user: user.clone(),
            });
        }
        unlink(&mut inner.users, room, user);
        unlink(&mut inner.rooms, user, room);
        drop(inner);

        tracing::debug!(room_id = %room, user_id = %user, "Member removed");
        Ok(())
    }

    fn rooms(&self, user: &UserId) -> Vec<RoomId> {
        self.inner.read().rooms.get(user).cloned().unwrap_or_default()
    }

    fn users(&self, room: &RoomId) -> Vec<UserId> {
        self.inner.read().users.get(room).cloned().unwrap_or_default()
    }

    fn peers(&self, user: &UserId) -> HashSet<UserId> {
        let inner = self.inner.read();
        let Some(rooms) = inner.rooms.get(user) else {
            return HashSet::new();
        };
        rooms
            .iter()
            .filter_map(|room| inner.users.get(room))
            .flatten()
            .cloned()
            .collect()
    }

    fn is_member(&self, room: &RoomId, user: &UserId) -> bool {
        self.inner
            .read()
            .members
            .contains(&(room.clone(), user.clone()))
    }
}
