//! Issue lifecycle rules.
//!
//! [`plan_creation`] and [`apply_patch`] are pure: they read the current
//! issue, the requested change and the user directory, and return either the
//! next issue state or the reason the change is rejected. They never lock or
//! perform I/O, which lets the issue store run them inside its critical
//! section.
//!
//! Rules enforced here:
//!
//! - an unassigned issue is always `PENDING`;
//! - a `COMPLETED` or `CANCELLED` issue never changes again;
//! - assigning a `PENDING` issue promotes it to `IN_PROGRESS` and unassigning
//!   an issue returns it to `PENDING`, unless the same request names an
//!   explicit status, which always wins when it is allowed.

use super::{Issue, IssueDomainError, IssueStatus, NewIssue, User, UserDirectory, UserId};
use chrono::{DateTime, Utc};

/// Assignee value that clears the current assignment in a patch.
pub const UNASSIGN: u64 = 0;

/// Caller-supplied fields for a new issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueDraft {
    title: String,
    description: String,
    assignee_id: Option<u64>,
    status: Option<String>,
}

impl IssueDraft {
    /// Creates a draft with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Requests an assignee. `0` is treated as no assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: u64) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Requests an explicit initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Partial update of an existing issue. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePatch {
    title: Option<String>,
    description: Option<String>,
    assignee_id: Option<u64>,
    status: Option<String>,
}

impl IssuePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Assigns the issue, or clears the assignee when `assignee_id` is
    /// [`UNASSIGN`].
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: u64) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub const fn unassign(self) -> Self {
        self.with_assignee(UNASSIGN)
    }

    /// Requests an explicit status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Validates a draft and computes the initial state of the issue.
///
/// # Errors
///
/// Returns [`IssueDomainError::TitleRequired`] for an empty title,
/// [`IssueDomainError::UnknownUser`] when the assignee cannot be resolved,
/// [`IssueDomainError::InvalidStatus`] for an unknown status string and
/// [`IssueDomainError::AssigneeRequiredForStatus`] when the requested status
/// needs an assignee the draft does not provide.
pub fn plan_creation(
    draft: &IssueDraft,
    directory: &impl UserDirectory,
    now: DateTime<Utc>,
) -> Result<NewIssue, IssueDomainError> {
    if draft.title.is_empty() {
        return Err(IssueDomainError::TitleRequired);
    }

    let assignee = match draft.assignee_id {
        None | Some(UNASSIGN) => None,
        Some(raw) => Some(resolve_user(directory, raw)?.id()),
    };

    let mut status = if assignee.is_some() {
        IssueStatus::InProgress
    } else {
        IssueStatus::Pending
    };
    if let Some(raw) = draft.status.as_deref() {
        let requested = IssueStatus::try_from(raw)?;
        ensure_assignable(requested, assignee)?;
        status = requested;
    }

    Ok(NewIssue {
        title: draft.title.clone(),
        description: draft.description.clone(),
        status,
        assignee,
        created_at: now,
    })
}

/// Computes the state of `current` after applying `patch`.
///
/// `current` is never modified; the returned issue is the candidate the
/// store commits.
///
/// # Errors
///
/// Returns [`IssueDomainError::IssueTerminal`] for completed or cancelled
/// issues, [`IssueDomainError::UnknownUser`] when a new assignee cannot be
/// resolved, [`IssueDomainError::InvalidStatus`] for an unknown status string
/// and [`IssueDomainError::AssigneeRequiredForStatus`] when the requested
/// status needs an assignee the issue will not have.
pub fn apply_patch(
    current: &Issue,
    patch: &IssuePatch,
    directory: &impl UserDirectory,
    now: DateTime<Utc>,
) -> Result<Issue, IssueDomainError> {
    if current.is_terminal() {
        return Err(IssueDomainError::IssueTerminal {
            issue_id: current.id,
            status: current.status,
        });
    }

    let mut next = current.clone();
    if let Some(title) = &patch.title {
        next.title.clone_from(title);
    }
    if let Some(description) = &patch.description {
        next.description.clone_from(description);
    }

    // Assignee first, so an explicit status below overrides derived status.
    match patch.assignee_id {
        None => {}
        Some(UNASSIGN) => {
            next.assignee = None;
            next.status = IssueStatus::Pending;
        }
        Some(raw) => {
            let user = resolve_user(directory, raw)?;
            next.assignee = Some(user.id());
            if next.status == IssueStatus::Pending && patch.status.is_none() {
                next.status = IssueStatus::InProgress;
            }
        }
    }

    if let Some(raw) = patch.status.as_deref() {
        let requested = IssueStatus::try_from(raw)?;
        ensure_assignable(requested, next.assignee)?;
        next.status = requested;
    }

    // Never moves backwards, even when the clock does.
    next.updated_at = now.max(current.updated_at);
    Ok(next)
}

fn resolve_user(directory: &impl UserDirectory, raw: u64) -> Result<User, IssueDomainError> {
    let id = UserId::new(raw);
    directory
        .find_user(id)
        .ok_or(IssueDomainError::UnknownUser(id))
}

const fn ensure_assignable(
    status: IssueStatus,
    assignee: Option<UserId>,
) -> Result<(), IssueDomainError> {
    if status.requires_assignee() && assignee.is_none() {
        return Err(IssueDomainError::AssigneeRequiredForStatus(status));
    }
    Ok(())
}
