//! Issue aggregate root.

use super::{IssueId, IssueStatus, UserId};
use chrono::{DateTime, Utc};

/// Validated issue state awaiting an identifier from the store.
///
/// Produced by [`plan_creation`](super::plan_creation); the store turns it
/// into an [`Issue`] once it has allocated the next [`IssueId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) status: IssueStatus,
    pub(super) assignee: Option<UserId>,
    pub(super) created_at: DateTime<Utc>,
}

impl NewIssue {
    /// Returns the issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the initial status computed by the creation rule.
    #[must_use]
    pub const fn status(&self) -> IssueStatus {
        self.status
    }

    /// Returns the resolved assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }
}

/// Issue aggregate root.
///
/// The assignee is held as a [`UserId`] only; callers resolve the user
/// through a [`UserDirectory`](super::UserDirectory) when they need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub(super) id: IssueId,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) status: IssueStatus,
    pub(super) assignee: Option<UserId>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl Issue {
    /// Materialises a planned issue under the identifier allocated for it.
    #[must_use]
    pub fn from_new(id: IssueId, new_issue: NewIssue) -> Self {
        Self {
            id,
            title: new_issue.title,
            description: new_issue.description,
            status: new_issue.status,
            assignee: new_issue.assignee,
            created_at: new_issue.created_at,
            updated_at: new_issue.created_at,
        }
    }

    /// Returns the issue identifier.
    #[must_use]
    pub const fn id(&self) -> IssueId {
        self.id
    }

    /// Returns the issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the issue description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> IssueStatus {
        self.status
    }

    /// Returns the assignee identifier, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the latest successful mutation.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the issue can no longer change.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
