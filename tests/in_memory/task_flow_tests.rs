//! In-memory integration tests for the task lifecycle.

use super::helpers::{App, app};
use rstest::rstest;
use taskmate::notification::domain::NotificationEvent;
use taskmate::task::{
    domain::{Task, TaskStatus},
    services::{CreateTaskRequest, TaskWriteOutcome, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_reaches_connected_listener(app: App) -> Result<(), eyre::Report> {
    let owner = app.register("Ada").await?;
    let mut listener = app.hub.connect(owner);
    let task = app
        .tasks
        .create(CreateTaskRequest::new(owner, "Write tests", "2026-11-01").with_priority("High"))
        .await?;

    let outcome = app
        .tasks
        .update(UpdateTaskRequest::new(owner, task.id()).with_status("Completed"))
        .await?;

    eyre::ensure!(outcome == TaskWriteOutcome::Applied, "update was not applied");
    let event = listener
        .try_recv()
        .ok_or_else(|| eyre::eyre!("no notification delivered"))?;
    eyre::ensure!(
        event == NotificationEvent::TaskCompleted { task_id: task.id() },
        "unexpected event {event:?}"
    );
    eyre::ensure!(
        event.to_json()? == format!(r#"{{"type":"taskCompleted","taskId":"{}"}}"#, task.id()),
        "unexpected wire form"
    );
    let balance = app
        .users
        .find_by_id(owner)
        .await?
        .ok_or_else(|| eyre::eyre!("owner vanished"))?
        .points();
    eyre::ensure!(balance == 10, "expected 10 points, found {balance}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_without_listeners_still_succeeds(app: App) -> Result<(), eyre::Report> {
    let owner = app.register("Ada").await?;
    let task = app
        .tasks
        .create(CreateTaskRequest::new(owner, "Quiet task", "2026-11-01"))
        .await?;

    let outcome = app
        .tasks
        .update(UpdateTaskRequest::new(owner, task.id()).with_status("completed"))
        .await?;

    eyre::ensure!(outcome.is_applied(), "update was not applied");
    eyre::ensure!(app.hub.connected_users() == 0, "no listener should exist");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_searching_and_deleting_stay_owner_scoped(app: App) -> Result<(), eyre::Report> {
    let ada = app.register("Ada").await?;
    let bob = app.register("Bob").await?;
    let milk = app
        .tasks
        .create(CreateTaskRequest::new(ada, "Buy Milk", "2026-11-01"))
        .await?;
    let laundry = app
        .tasks
        .create(CreateTaskRequest::new(ada, "Laundry", "2026-11-02"))
        .await?;
    app.tasks
        .create(CreateTaskRequest::new(bob, "Buy milk for Bob", "2026-11-03"))
        .await?;

    let listed: Vec<_> = app.tasks.list(ada).await?.iter().map(Task::id).collect();
    eyre::ensure!(listed == vec![laundry.id(), milk.id()], "newest-first order broken");

    let found = app.tasks.search(ada, "MILK").await?;
    eyre::ensure!(found.len() == 1, "search leaked another owner's task");

    let foreign_delete = app.tasks.delete(bob, milk.id()).await?;
    eyre::ensure!(
        foreign_delete == TaskWriteOutcome::NoMatchingTask,
        "foreign delete should be a no-op"
    );
    let own_delete = app.tasks.delete(ada, milk.id()).await?;
    eyre::ensure!(own_delete == TaskWriteOutcome::Applied, "own delete failed");
    eyre::ensure!(
        app.tasks.get(ada, milk.id()).await?.is_none(),
        "deleted task still visible"
    );

    let pending = app.tasks.filter_by_status(ada, None).await?;
    eyre::ensure!(
        pending.iter().all(|task| task.status() == TaskStatus::Pending),
        "default filter returned non-pending tasks"
    );
    Ok(())
}
