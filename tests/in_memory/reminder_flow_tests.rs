//! In-memory integration tests for deadline reminders.

use std::sync::Arc;

use super::helpers::{App, app};
use chrono::{TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use taskmate::reminder::{
    adapters::memory::InMemoryReminderOutbox, services::DeadlineReminderService,
};
use taskmate::task::services::{CreateTaskRequest, UpdateTaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_tasks_are_not_reminded(app: App) -> Result<(), eyre::Report> {
    let owner = app.register("Ada").await?;
    let soon = (Utc::now() + TimeDelta::hours(2)).to_rfc3339();
    let open = app
        .tasks
        .create(CreateTaskRequest::new(owner, "Still open", soon.clone()))
        .await?;
    let done = app
        .tasks
        .create(CreateTaskRequest::new(owner, "Already done", soon))
        .await?;
    app.tasks
        .update(UpdateTaskRequest::new(owner, done.id()).with_status("Completed"))
        .await?;
    let outbox = InMemoryReminderOutbox::new();
    let reminders = DeadlineReminderService::new(
        Arc::clone(&app.task_repository),
        Arc::clone(&app.user_repository),
        Arc::new(outbox.clone()),
        Arc::new(DefaultClock),
    );

    let report = reminders.send_due_reminders().await?;

    eyre::ensure!(report.sent == 1 && report.failed == 0, "unexpected report {report:?}");
    let messages = outbox.messages();
    let message = messages
        .first()
        .ok_or_else(|| eyre::eyre!("no reminder recorded"))?;
    eyre::ensure!(message.task_ids == vec![open.id()], "wrong tasks reminded");
    Ok(())
}
