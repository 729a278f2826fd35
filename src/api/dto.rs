//! Request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::issue::domain::{Issue, IssueDraft, IssuePatch, IssueStatus, User};

/// Body of `POST /issue`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueBody {
    /// Required title; a missing title is treated as empty.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
    /// Optional assignee. `userId` is accepted as an alias.
    #[serde(default, alias = "userId")]
    pub assignee_id: Option<u64>,
    /// Optional explicit initial status.
    #[serde(default)]
    pub status: Option<String>,
}

impl From<CreateIssueBody> for IssueDraft {
    fn from(body: CreateIssueBody) -> Self {
        let mut draft = Self::new(body.title).with_description(body.description);
        if let Some(assignee_id) = body.assignee_id {
            draft = draft.with_assignee(assignee_id);
        }
        if let Some(status) = body.status {
            draft = draft.with_status(status);
        }
        draft
    }
}

/// Body of `PATCH /issue/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchIssueBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// New assignee; `0` unassigns. `userId` is accepted as an alias.
    #[serde(default, alias = "userId")]
    pub assignee_id: Option<u64>,
    /// Explicit status.
    #[serde(default)]
    pub status: Option<String>,
}

impl From<PatchIssueBody> for IssuePatch {
    fn from(body: PatchIssueBody) -> Self {
        let mut patch = Self::new();
        if let Some(title) = body.title {
            patch = patch.with_title(title);
        }
        if let Some(description) = body.description {
            patch = patch.with_description(description);
        }
        if let Some(assignee_id) = body.assignee_id {
            patch = patch.with_assignee(assignee_id);
        }
        if let Some(status) = body.status {
            patch = patch.with_status(status);
        }
        patch
    }
}

/// Query string of `GET /issues`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListIssuesQuery {
    /// Optional status filter. An empty value means no filter.
    #[serde(default)]
    pub status: Option<String>,
}

/// Issue as rendered to clients, with its assignee resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    /// Issue identifier.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: IssueStatus,
    /// Assigned user, or `null`.
    pub assignee: Option<User>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the latest change.
    pub updated_at: DateTime<Utc>,
}

impl IssueResponse {
    /// Renders `issue` with an already resolved assignee.
    #[must_use]
    pub fn new(issue: &Issue, assignee: Option<User>) -> Self {
        Self {
            id: issue.id().value(),
            title: issue.title().to_owned(),
            description: issue.description().to_owned(),
            status: issue.status(),
            assignee,
            created_at: issue.created_at(),
            updated_at: issue.updated_at(),
        }
    }
}

/// Body of `GET /issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueListResponse {
    /// Matching issues in identifier order.
    pub issues: Vec<IssueResponse>,
}

/// Body of `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListResponse {
    /// Users issues can be assigned to.
    pub users: Vec<User>,
}
