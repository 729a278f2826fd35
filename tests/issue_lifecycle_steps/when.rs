//! When steps for issue lifecycle BDD scenarios.

use super::world::{IssueLifecycleWorld, run_async};
use itops::issue::domain::{IssueDraft, IssuePatch};
use rstest_bdd_macros::when;

#[when(r#"an issue titled "{title}" is created for user {user:u64}"#)]
fn create_for_user(world: &mut IssueLifecycleWorld, title: String, user: u64) {
    let result = run_async(
        world
            .service
            .create(IssueDraft::new(title).with_assignee(user)),
    );
    world.record(result);
}

#[when(r#"an issue titled "{title}" is created without an assignee"#)]
fn create_unassigned(world: &mut IssueLifecycleWorld, title: String) {
    let result = run_async(world.service.create(IssueDraft::new(title)));
    world.record(result);
}

fn patch_current(world: &mut IssueLifecycleWorld, patch: IssuePatch) -> Result<(), eyre::Report> {
    let id = world.current_issue()?.id();
    let result = run_async(world.service.update(id, patch));
    world.record(result);
    Ok(())
}

#[when("the issue is assigned to user {user:u64}")]
fn assign_issue(world: &mut IssueLifecycleWorld, user: u64) -> Result<(), eyre::Report> {
    patch_current(world, IssuePatch::new().with_assignee(user))
}

#[when("the issue is unassigned")]
fn unassign_issue(world: &mut IssueLifecycleWorld) -> Result<(), eyre::Report> {
    patch_current(world, IssuePatch::new().unassign())
}

#[when(r#"the issue status is changed to "{status}""#)]
fn change_status(world: &mut IssueLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    patch_current(world, IssuePatch::new().with_status(status))
}

#[when(r#"the issue is unassigned and its status is changed to "{status}""#)]
fn unassign_and_change_status(
    world: &mut IssueLifecycleWorld,
    status: String,
) -> Result<(), eyre::Report> {
    patch_current(world, IssuePatch::new().unassign().with_status(status))
}

#[when(r#"the issue title is changed to "{title}""#)]
fn change_title(world: &mut IssueLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    patch_current(world, IssuePatch::new().with_title(title))
}
