//! Error types for issue validation and lifecycle rejections.

use super::{IssueId, IssueStatus, UserId};
use thiserror::Error;

/// Reasons the lifecycle rules reject a create or patch request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueDomainError {
    /// The issue title is empty.
    #[error("issue title must not be empty")]
    TitleRequired,

    /// The referenced assignee does not exist in the user directory.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// The requested status is not one of the known values.
    #[error(transparent)]
    InvalidStatus(#[from] ParseIssueStatusError),

    /// The requested status cannot be held by an unassigned issue.
    #[error("status {0} requires an assignee")]
    AssigneeRequiredForStatus(IssueStatus),

    /// The issue is completed or cancelled and can no longer change.
    #[error("issue {issue_id} is {status} and can no longer be modified")]
    IssueTerminal {
        /// Issue that rejected the change.
        issue_id: IssueId,
        /// Terminal status the issue holds.
        status: IssueStatus,
    },
}

/// Error returned while parsing an issue status string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid issue status: {0}")]
pub struct ParseIssueStatusError(pub String);
