//! Repository port for issue storage and atomic mutation.

use crate::issue::domain::{Issue, IssueDomainError, IssueId, IssueStatus, NewIssue};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue repository operations.
pub type IssueRepositoryResult<T> = Result<T, IssueRepositoryError>;

/// Issue storage contract.
///
/// Implementations must make every operation linearizable: `create` and
/// `update` observe all previously completed writes and never interleave
/// with each other.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Allocates the next identifier and stores the issue under it.
    ///
    /// Identifier allocation and insertion happen as one unit, so identifiers
    /// are strictly increasing and never reused.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::IdSpaceExhausted`] when no further
    /// identifier can be allocated, or
    /// [`IssueRepositoryError::Persistence`] on storage failure.
    async fn create(&self, issue: NewIssue) -> IssueRepositoryResult<Issue>;

    /// Finds an issue by identifier.
    ///
    /// Returns `None` when the issue does not exist.
    async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>>;

    /// Returns issues ordered by identifier, optionally restricted to one
    /// status.
    async fn list(&self, status: Option<IssueStatus>) -> IssueRepositoryResult<Vec<Issue>>;

    /// Atomically replaces an issue with the result of `mutation`.
    ///
    /// `mutation` receives the current issue while the repository excludes
    /// every other writer, and returns the candidate to commit. Nothing is
    /// committed when it returns an error.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::NotFound`] when the issue does not
    /// exist and [`IssueRepositoryError::Rejected`] when `mutation` fails.
    async fn update<F>(&self, id: IssueId, mutation: F) -> IssueRepositoryResult<Issue>
    where
        F: FnOnce(&Issue) -> Result<Issue, IssueDomainError> + Send;
}

/// Errors returned by issue repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IssueRepositoryError {
    /// The issue was not found.
    #[error("issue not found: {0}")]
    NotFound(IssueId),

    /// The mutation passed to [`IssueRepository::update`] rejected the change.
    #[error(transparent)]
    Rejected(#[from] IssueDomainError),

    /// Every identifier has been allocated.
    #[error("issue identifier space exhausted")]
    IdSpaceExhausted,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
