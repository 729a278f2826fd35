//! Concurrency tests for the in-memory issue tracker.

use std::collections::BTreeSet;

use super::helpers::{TestService, create_pending, service};
use itops::issue::domain::{Issue, IssueDraft, IssueId, IssuePatch, IssueStatus, UserId};
use rstest::rstest;
use tokio::task::JoinSet;

const WRITERS: u64 = 32;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_allocate_distinct_sequential_ids(
    service: TestService,
) -> Result<(), eyre::Report> {
    let mut tasks = JoinSet::new();
    for index in 0..WRITERS {
        let writer = service.clone();
        tasks.spawn(async move {
            writer
                .create(IssueDraft::new(format!("issue {index}")))
                .await
        });
    }

    let mut ids = BTreeSet::new();
    while let Some(joined) = tasks.join_next().await {
        let issue = joined??;
        eyre::ensure!(ids.insert(issue.id()), "duplicate id {}", issue.id());
    }

    let expected: BTreeSet<IssueId> = (1..=WRITERS).map(IssueId::new).collect();
    eyre::ensure!(ids == expected, "ids should be exactly 1..={WRITERS}");
    eyre::ensure!(service.list(None).await?.len() == ids.len());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_patches_never_break_the_assignee_rule(
    service: TestService,
) -> Result<(), eyre::Report> {
    let issue = create_pending(&service, "contended").await?;
    let id = issue.id();

    let mut tasks = JoinSet::new();
    for round in 0..WRITERS {
        let writer = service.clone();
        let patch = match round % 4 {
            0 => IssuePatch::new().with_assignee(1 + round % 3),
            1 => IssuePatch::new().unassign(),
            2 => IssuePatch::new().with_status("IN_PROGRESS"),
            _ => IssuePatch::new().with_description(format!("round {round}")),
        };
        tasks.spawn(async move { writer.update(id, patch).await });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Ok(updated) = joined? {
            eyre::ensure!(
                updated.status() == IssueStatus::Pending || updated.assignee().is_some(),
                "observed {} without an assignee",
                updated.status()
            );
        }
    }

    let stored = service.find_by_id(id).await?;
    eyre::ensure!(stored.status() == IssueStatus::Pending || stored.assignee().is_some());
    eyre::ensure!(!stored.is_terminal());
    Ok(())
}

/// Spawns one description edit per writer and returns every committed issue.
async fn spawn_description_edits(
    service: &TestService,
    id: IssueId,
) -> Result<Vec<Issue>, eyre::Report> {
    let mut tasks = JoinSet::new();
    for round in 0..WRITERS {
        let writer = service.clone();
        tasks.spawn(async move {
            writer
                .update(id, IssuePatch::new().with_description(format!("edit {round}")))
                .await
        });
    }

    let mut committed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        committed.push(joined??);
    }
    Ok(committed)
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn last_committed_description_edit_is_the_stored_state(
    service: TestService,
) -> Result<(), eyre::Report> {
    let issue = create_pending(&service, "edits").await?;
    let committed = spawn_description_edits(&service, issue.id()).await?;
    eyre::ensure!(committed.len() == usize::try_from(WRITERS)?);

    let stored = service.find_by_id(issue.id()).await?;
    eyre::ensure!(
        committed.contains(&stored),
        "stored issue {stored:?} matches no committed response"
    );
    let latest_stamp = committed
        .iter()
        .map(Issue::updated_at)
        .max()
        .ok_or_else(|| eyre::eyre!("no committed edits"))?;
    eyre::ensure!(stored.updated_at() == latest_stamp);

    let mut descriptions: Vec<&str> = committed.iter().map(Issue::description).collect();
    descriptions.sort_unstable();
    descriptions.dedup();
    eyre::ensure!(
        descriptions.len() == committed.len(),
        "every edit should commit its own description"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_patches_on_different_fields_are_both_kept(
    service: TestService,
) -> Result<(), eyre::Report> {
    for round in 0..WRITERS {
        let issue = create_pending(&service, &format!("race {round}")).await?;
        let id = issue.id();

        let assigner = service.clone();
        let editor = service.clone();
        let assign = tokio::spawn(async move {
            assigner.update(id, IssuePatch::new().with_assignee(1)).await
        });
        let describe = tokio::spawn(async move {
            editor
                .update(id, IssuePatch::new().with_description("described"))
                .await
        });
        assign.await??;
        describe.await??;

        let stored = service.find_by_id(id).await?;
        eyre::ensure!(stored.assignee() == Some(UserId::new(1)), "assignment lost");
        eyre::ensure!(stored.status() == IssueStatus::InProgress);
        eyre::ensure!(stored.description() == "described", "description lost");
    }
    Ok(())
}
