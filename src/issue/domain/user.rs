//! Users that issues can be assigned to.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A known assignee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Read-only lookup of the users issues may be assigned to.
///
/// Lookups run while the issue store holds its write lock; they must not
/// block or perform I/O.
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when no user has the given identifier.
    fn find_user(&self, id: UserId) -> Option<User>;

    /// Returns every known user ordered by identifier.
    fn list_users(&self) -> Vec<User>;
}
