//! Issue lifecycle status.

use super::ParseIssueStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    /// Work has not started. The only status an unassigned issue may hold.
    Pending,
    /// The assignee is working on the issue.
    InProgress,
    /// The issue has been resolved.
    Completed,
    /// The issue has been dropped.
    Cancelled,
}

impl IssueStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns `true` when no further change is allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns `true` when an issue may only hold this status while assigned.
    #[must_use]
    pub const fn requires_assignee(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for IssueStatus {
    type Error = ParseIssueStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ParseIssueStatusError(value.to_owned())),
        }
    }
}
