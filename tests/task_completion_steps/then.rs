//! Then steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskmate::notification::domain::NotificationEvent;
use taskmate::task::{domain::TaskStatus, services::TaskWriteOutcome};

fn expect_outcome(world: &TaskCompletionWorld, expected: TaskWriteOutcome) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update outcome"))?;
    match outcome {
        Ok(actual) if *actual == expected => Ok(()),
        other => Err(eyre::eyre!("expected {expected:?}, got {other:?}")),
    }
}

#[then("the update is applied")]
fn update_applied(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    expect_outcome(world, TaskWriteOutcome::Applied)
}

#[then("no owned task matched the update")]
fn no_owned_task_matched(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    expect_outcome(world, TaskWriteOutcome::NoMatchingTask)
}

#[then("there was nothing to apply")]
fn nothing_to_apply(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    expect_outcome(world, TaskWriteOutcome::NothingToApply)
}

#[then(r#""{name}" has {points:u64} points"#)]
fn has_points(world: &TaskCompletionWorld, name: String, points: u64) -> Result<(), eyre::Report> {
    let user_id = world.user(&name)?;
    let user = run_async(world.users.find_by_id(user_id))
        .wrap_err("load scenario user")?
        .ok_or_else(|| eyre::eyre!("user {name} disappeared"))?;
    eyre::ensure!(
        user.points() == points,
        "expected {name} to hold {points} points, found {}",
        user.points()
    );
    Ok(())
}

#[then(r#""{name}" receives a task completed notification"#)]
fn receives_notification(world: &mut TaskCompletionWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let listener = world
        .listeners
        .get_mut(&name)
        .ok_or_else(|| eyre::eyre!("{name} is not listening"))?;
    let event = listener
        .try_recv()
        .ok_or_else(|| eyre::eyre!("{name} received no notification"))?;
    eyre::ensure!(
        event == NotificationEvent::TaskCompleted { task_id },
        "unexpected notification {event:?}"
    );
    Ok(())
}

#[then(r#""{name}" receives no notification"#)]
fn receives_no_notification(world: &mut TaskCompletionWorld, name: String) -> Result<(), eyre::Report> {
    let listener = world
        .listeners
        .get_mut(&name)
        .ok_or_else(|| eyre::eyre!("{name} is not listening"))?;
    if let Some(event) = listener.try_recv() {
        return Err(eyre::eyre!("{name} unexpectedly received {event:?}"));
    }
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskCompletionWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task()?;
    let stored = run_async(world.tasks.get(task.owner_id(), task.id()))
        .wrap_err("reload scenario task")?
        .ok_or_else(|| eyre::eyre!("scenario task disappeared"))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected status {}, found {}",
        expected.as_str(),
        stored.status().as_str()
    );
    Ok(())
}
