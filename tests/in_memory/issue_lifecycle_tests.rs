//! In-memory integration tests for issue lifecycle operations.

use super::helpers::{TestService, create_assigned, create_pending, service};
use itops::issue::{
    domain::{IssueDomainError, IssueDraft, IssueId, IssuePatch, IssueStatus, UserId},
    services::{IssueErrorKind, IssueTrackerError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigning_then_completing_walks_the_lifecycle(
    service: TestService,
) -> Result<(), eyre::Report> {
    let created = create_pending(&service, "Investigate outage").await?;
    eyre::ensure!(created.status() == IssueStatus::Pending);
    eyre::ensure!(created.assignee().is_none());

    let assigned = service
        .update(created.id(), IssuePatch::new().with_assignee(2))
        .await?;
    eyre::ensure!(assigned.status() == IssueStatus::InProgress);
    eyre::ensure!(assigned.assignee() == Some(UserId::new(2)));

    let completed = service
        .update(created.id(), IssuePatch::new().with_status("COMPLETED"))
        .await?;
    eyre::ensure!(completed.status() == IssueStatus::Completed);
    eyre::ensure!(completed.assignee() == Some(UserId::new(2)));
    eyre::ensure!(completed.updated_at() >= assigned.updated_at());

    let fetched = service.find_by_id(created.id()).await?;
    eyre::ensure!(fetched == completed, "stored issue should match last update");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigning_returns_issue_to_pending(service: TestService) -> Result<(), eyre::Report> {
    let created = create_assigned(&service, "Draft release notes", 1).await?;
    eyre::ensure!(created.status() == IssueStatus::InProgress);

    let unassigned = service
        .update(created.id(), IssuePatch::new().unassign())
        .await?;
    eyre::ensure!(unassigned.status() == IssueStatus::Pending);
    eyre::ensure!(unassigned.assignee().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminal_issues_reject_every_change(service: TestService) -> Result<(), eyre::Report> {
    let created = create_assigned(&service, "Retire legacy endpoint", 3).await?;
    service
        .update(created.id(), IssuePatch::new().with_status("CANCELLED"))
        .await?;

    let result = service
        .update(created.id(), IssuePatch::new().with_title("Renamed"))
        .await;
    let Err(err) = result else {
        eyre::bail!("expected terminal issue to reject the update");
    };
    eyre::ensure!(err.kind() == IssueErrorKind::IssueTerminal);

    let stored = service.find_by_id(created.id()).await?;
    eyre::ensure!(stored.title() == "Retire legacy endpoint");
    eyre::ensure!(stored.status() == IssueStatus::Cancelled);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_updates_leave_the_store_untouched(
    service: TestService,
) -> Result<(), eyre::Report> {
    let created = create_pending(&service, "Review access logs").await?;

    let result = service
        .update(
            created.id(),
            IssuePatch::new()
                .with_title("Should not stick")
                .with_status("IN_PROGRESS"),
        )
        .await;
    eyre::ensure!(matches!(
        result,
        Err(IssueTrackerError::Domain(
            IssueDomainError::AssigneeRequiredForStatus(IssueStatus::InProgress)
        ))
    ));

    let stored = service.find_by_id(created.id()).await?;
    eyre::ensure!(stored == created, "rejected patch must not be persisted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_filters_by_status_in_id_order(service: TestService) -> Result<(), eyre::Report> {
    let first = create_pending(&service, "first").await?;
    let second = create_assigned(&service, "second", 1).await?;
    let third = create_pending(&service, "third").await?;

    let all = service.list(None).await?;
    let ids: Vec<IssueId> = all.iter().map(|issue| issue.id()).collect();
    eyre::ensure!(ids == vec![first.id(), second.id(), third.id()]);

    let pending = service.list(Some("PENDING")).await?;
    let pending_ids: Vec<IssueId> = pending.iter().map(|issue| issue.id()).collect();
    eyre::ensure!(pending_ids == vec![first.id(), third.id()]);

    let completed = service.list(Some("COMPLETED")).await?;
    eyre::ensure!(completed.is_empty());
    Ok(())
}

#[rstest]
#[case::empty_title(IssueDraft::new(""), IssueErrorKind::TitleRequired)]
#[case::padded_status(
    IssueDraft::new("x").with_assignee(1).with_status(" COMPLETED\n"),
    IssueErrorKind::InvalidStatus
)]
#[case::unknown_user(IssueDraft::new("x").with_assignee(99), IssueErrorKind::UnknownUser)]
#[case::bad_status(IssueDraft::new("x").with_status("DONE"), IssueErrorKind::InvalidStatus)]
#[case::status_without_assignee(
    IssueDraft::new("x").with_status("COMPLETED"),
    IssueErrorKind::AssigneeRequiredForStatus
)]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_drafts_are_rejected_without_consuming_ids(
    service: TestService,
    #[case] draft: IssueDraft,
    #[case] expected: IssueErrorKind,
) -> Result<(), eyre::Report> {
    let Err(err) = service.create(draft).await else {
        eyre::bail!("expected draft to be rejected");
    };
    eyre::ensure!(err.kind() == expected, "unexpected error kind {:?}", err.kind());

    let next = create_pending(&service, "after rejection").await?;
    eyre::ensure!(next.id() == IssueId::new(1));
    Ok(())
}
