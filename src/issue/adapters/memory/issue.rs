//! In-memory issue repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::issue::{
    domain::{Issue, IssueDomainError, IssueId, IssueStatus, NewIssue},
    ports::{IssueRepository, IssueRepositoryError, IssueRepositoryResult},
};

/// Thread-safe in-memory issue repository.
///
/// The issue map and the identifier counter share one [`RwLock`]: `create`
/// and `update` hold the write lock for their whole duration, `find_by_id`
/// and `list` only read. State is lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueRepository {
    state: Arc<RwLock<InMemoryIssueState>>,
}

#[derive(Debug, Default)]
struct InMemoryIssueState {
    issues: BTreeMap<IssueId, Issue>,
    last_id: u64,
}

impl InMemoryIssueRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> IssueRepositoryError {
    IssueRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn create(&self, issue: NewIssue) -> IssueRepositoryResult<Issue> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let next_id = state
            .last_id
            .checked_add(1)
            .ok_or(IssueRepositoryError::IdSpaceExhausted)?;

        let created = Issue::from_new(IssueId::new(next_id), issue);
        state.issues.insert(created.id(), created.clone());
        state.last_id = next_id;
        Ok(created)
    }

    async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.issues.get(&id).cloned())
    }

    async fn list(&self, status: Option<IssueStatus>) -> IssueRepositoryResult<Vec<Issue>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .issues
            .values()
            .filter(|issue| status.is_none_or(|wanted| issue.status() == wanted))
            .cloned()
            .collect())
    }

    async fn update<F>(&self, id: IssueId, mutation: F) -> IssueRepositoryResult<Issue>
    where
        F: FnOnce(&Issue) -> Result<Issue, IssueDomainError> + Send,
    {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let current = state
            .issues
            .get(&id)
            .ok_or(IssueRepositoryError::NotFound(id))?;

        let candidate = mutation(current)?;
        state.issues.insert(id, candidate.clone());
        Ok(candidate)
    }
}
