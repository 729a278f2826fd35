//! Service layer for issue creation, lookup and updates.

use crate::issue::{
    domain::{
        Issue, IssueDomainError, IssueDraft, IssueId, IssuePatch, IssueStatus, User,
        UserDirectory, apply_patch, plan_creation,
    },
    ports::{IssueRepository, IssueRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for issue tracker operations.
#[derive(Debug, Error)]
pub enum IssueTrackerError {
    /// The lifecycle rules rejected the request.
    #[error(transparent)]
    Domain(#[from] IssueDomainError),
    /// No issue exists with the given identifier.
    #[error("issue {0} not found")]
    NotFound(IssueId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(IssueRepositoryError),
}

impl From<IssueRepositoryError> for IssueTrackerError {
    fn from(err: IssueRepositoryError) -> Self {
        match err {
            IssueRepositoryError::Rejected(domain) => Self::Domain(domain),
            IssueRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Classification of [`IssueTrackerError`] for transport adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueErrorKind {
    /// Creation with an empty title.
    TitleRequired,
    /// The referenced assignee does not exist.
    UnknownUser,
    /// The status string is not a known status.
    InvalidStatus,
    /// The requested status needs an assignee.
    AssigneeRequiredForStatus,
    /// The issue is completed or cancelled.
    IssueTerminal,
    /// The issue does not exist.
    IssueNotFound,
    /// Storage failed; not caused by the request.
    Internal,
}

impl IssueTrackerError {
    /// Returns the kind of failure.
    #[must_use]
    pub const fn kind(&self) -> IssueErrorKind {
        match self {
            Self::Domain(IssueDomainError::TitleRequired) => IssueErrorKind::TitleRequired,
            Self::Domain(IssueDomainError::UnknownUser(_)) => IssueErrorKind::UnknownUser,
            Self::Domain(IssueDomainError::InvalidStatus(_)) => IssueErrorKind::InvalidStatus,
            Self::Domain(IssueDomainError::AssigneeRequiredForStatus(_)) => {
                IssueErrorKind::AssigneeRequiredForStatus
            }
            Self::Domain(IssueDomainError::IssueTerminal { .. }) => IssueErrorKind::IssueTerminal,
            Self::NotFound(_) => IssueErrorKind::IssueNotFound,
            Self::Repository(_) => IssueErrorKind::Internal,
        }
    }
}

/// Result type for issue tracker service operations.
pub type IssueTrackerResult<T> = Result<T, IssueTrackerError>;

/// Issue tracker orchestration service.
///
/// Computes every change with the pure lifecycle rules and lets the
/// repository commit it atomically.
pub struct IssueTrackerService<R, D, C>
where
    R: IssueRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<R, D, C> Clone for IssueTrackerService<R, D, C>
where
    R: IssueRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            directory: Arc::clone(&self.directory),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, D, C> IssueTrackerService<R, D, C>
where
    R: IssueRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new issue tracker service.
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
        }
    }

    /// Creates an issue from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Domain`] when the draft breaks a
    /// lifecycle rule, or [`IssueTrackerError::Repository`] when storage
    /// fails.
    pub async fn create(&self, draft: IssueDraft) -> IssueTrackerResult<Issue> {
        let planned = plan_creation(&draft, &*self.directory, self.clock.utc())
            .inspect_err(|err| debug!(error = %err, "issue creation rejected"))?;
        let issue = self.repository.create(planned).await?;
        info!(
            issue_id = %issue.id(),
            status = %issue.status(),
            assignee = ?issue.assignee().map(|id| id.value()),
            "issue created"
        );
        Ok(issue)
    }

    /// Retrieves an issue by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::NotFound`] when the issue does not exist,
    /// or [`IssueTrackerError::Repository`] when storage fails.
    pub async fn find_by_id(&self, id: IssueId) -> IssueTrackerResult<Issue> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(IssueTrackerError::NotFound(id))
    }

    /// Lists issues, optionally restricted to the status named by `status`.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Domain`] wrapping
    /// [`IssueDomainError::InvalidStatus`] when `status` is not a known
    /// status, or [`IssueTrackerError::Repository`] when storage fails.
    pub async fn list(&self, status: Option<&str>) -> IssueTrackerResult<Vec<Issue>> {
        let filter = status
            .map(IssueStatus::try_from)
            .transpose()
            .map_err(IssueDomainError::from)?;
        Ok(self.repository.list(filter).await?)
    }

    /// Applies a partial update to an issue.
    ///
    /// The lifecycle rules run against the stored issue while the repository
    /// holds off every other writer, so concurrent updates never lose each
    /// other's changes.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::NotFound`] when the issue does not exist,
    /// [`IssueTrackerError::Domain`] when the patch breaks a lifecycle rule,
    /// or [`IssueTrackerError::Repository`] when storage fails.
    pub async fn update(&self, id: IssueId, patch: IssuePatch) -> IssueTrackerResult<Issue> {
        let directory = &*self.directory;
        let now = self.clock.utc();
        let updated = self
            .repository
            .update(id, move |current| apply_patch(current, &patch, directory, now))
            .await
            .map_err(IssueTrackerError::from)
            .inspect_err(|err| debug!(issue_id = %id, error = %err, "issue update rejected"))?;
        info!(
            issue_id = %updated.id(),
            status = %updated.status(),
            assignee = ?updated.assignee().map(|user| user.value()),
            "issue updated"
        );
        Ok(updated)
    }

    /// Resolves the assignee of `issue` against the user directory.
    ///
    /// Returns `None` for unassigned issues.
    #[must_use]
    pub fn assignee_of(&self, issue: &Issue) -> Option<User> {
        issue
            .assignee()
            .and_then(|id| self.directory.find_user(id))
    }

    /// Returns every user issues can be assigned to.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.directory.list_users()
    }
}
