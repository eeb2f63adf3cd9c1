use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub room_id: String,
    pub role: Role,
}

impl User {
    pub fn new(id: impl Into<String>, room_id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            room_id: room_id.into(),
            role,
        }
    }
}

/// Users keyed by id. A `BTreeMap` so listings come out in id order.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: BTreeMap<String, User>,
}

impl UserStore {
    pub fn seeded() -> Self {
        let mut store = Self::default();
        store.reset();
        store
    }

    pub fn reset(&mut self) {
        self.users.clear();
        for user in [
            User::new("u1", "r1", Role::Admin),
            User::new("u2", "r1", Role::Member),
            User::new("u3", "r2", Role::Admin),
        ] {
            self.insert(user);
        }
    }

    pub fn insert(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn find_by_id(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// The admin code is the user id for now.
    pub fn find_by_code(&self, code: &str) -> Option<&User> {
        self.find_by_id(code)
    }

    /// No-op when the id is unknown.
    pub fn delete(&mut self, id: &str) {
        self.users.remove(id);
    }

    pub fn in_room<'a>(&'a self, room_id: &'a str) -> impl Iterator<Item = &'a User> + 'a {
        self.users.values().filter(move |user| user.room_id == room_id)
    }

    pub fn count_in_room(&self, room_id: &str) -> usize {
        self.in_room(room_id).count()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_three_users() {
        let store = UserStore::seeded();
        assert_eq!(store.len(), 3);
        assert_eq!(store.find_by_id("u1").map(|u| u.role), Some(Role::Admin));
        assert_eq!(store.find_by_id("u2").map(|u| u.role), Some(Role::Member));
        assert_eq!(store.find_by_id("u3").map(|u| u.room_id.as_str()), Some("r2"));
    }

    #[test]
    fn code_resolves_to_user_with_same_id() {
        let store = UserStore::seeded();
        assert_eq!(store.find_by_code("u3").map(|u| u.id.as_str()), Some("u3"));
        assert!(store.find_by_code("nope").is_none());
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut store = UserStore::seeded();
        store.delete("ghost");
        assert_eq!(store.len(), 3);

        store.delete("u2");
        store.delete("u2");
        assert!(store.find_by_id("u2").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn counts_and_lists_by_room() {
        let mut store = UserStore::seeded();
        assert_eq!(store.count_in_room("r1"), 2);
        assert_eq!(store.count_in_room("r2"), 1);
        assert_eq!(store.count_in_room("r9"), 0);

        store.insert(User::new("u0", "r1", Role::Member));
        let ids: Vec<_> = store.in_room("r1").map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["u0", "u1", "u2"]);
    }

    #[test]
    fn reset_restores_seed() {
        let mut store = UserStore::seeded();
        store.delete("u1");
        store.insert(User::new("u9", "r3", Role::Admin));

        store.reset();
        assert_eq!(store.len(), 3);
        assert!(store.find_by_id("u1").is_some());
        assert!(store.find_by_id("u9").is_none());
    }
}
