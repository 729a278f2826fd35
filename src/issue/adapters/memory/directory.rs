//! Fixed user directory seeded at startup.

use crate::issue::domain::{User, UserDirectory, UserId};

/// Immutable user directory backed by a sorted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticUserDirectory {
    users: Vec<User>,
}

impl StaticUserDirectory {
    /// Creates a directory holding exactly `users`.
    ///
    /// Later duplicates of an identifier are ignored.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        let mut sorted: Vec<User> = users.into_iter().collect();
        sorted.sort_by_key(User::id);
        sorted.dedup_by_key(|user| user.id());
        Self { users: sorted }
    }

    /// Creates the directory of users shipped with the service.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new([
            User::new(UserId::new(1), "김개발"),
            User::new(UserId::new(2), "이디자인"),
            User::new(UserId::new(3), "박기획"),
        ])
    }

    /// Returns the number of users.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` when the directory holds no users.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for StaticUserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

impl UserDirectory for StaticUserDirectory {
    fn find_user(&self, id: UserId) -> Option<User> {
        self.users
            .binary_search_by_key(&id, User::id)
            .ok()
            .and_then(|index| self.users.get(index))
            .cloned()
    }

    fn list_users(&self) -> Vec<User> {
        self.users.clone()
    }
}
