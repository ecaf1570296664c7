//! `PostgreSQL` integration tests for the task repository.

use crate::postgres::helpers::{BoxError, TestSchema, insert_user, schema};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::rstest;
use taskmate::task::{
    domain::{Deadline, NewTaskData, Task, TaskPatch, TaskPriority, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use taskmate::user::domain::UserId;

fn new_task(owner_id: UserId, title: &str) -> Result<Task, BoxError> {
    Ok(Task::new(
        NewTaskData {
            owner_id,
            title: TaskTitle::new(title)?,
            description: None,
            deadline: Deadline::new("2026-12-01")?,
            priority: TaskPriority::Medium,
        },
        &DefaultClock,
    ))
}

fn completion_patch() -> TaskPatch {
    TaskPatch {
        status: Some(TaskStatus::Completed),
        ..TaskPatch::default()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn writes_are_scoped_to_the_owner(
    #[future] schema: Result<Option<TestSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(db) = schema.await? else {
        return Ok(());
    };
    let users = db.users();
    let tasks = db.tasks();
    let ada = insert_user(&users, "Ada").await?;
    let bob = insert_user(&users, "Bob").await?;
    let task = new_task(ada.id(), "Renew passport")?;
    tasks.store(&task).await?;

    let foreign = tasks
        .apply_patch(bob.id(), task.id(), &completion_patch(), Utc::now())
        .await?;
    assert!(!foreign);
    assert!(!tasks.delete_owned(bob.id(), task.id()).await?);

    let own = tasks
        .apply_patch(ada.id(), task.id(), &completion_patch(), Utc::now())
        .await?;
    assert!(own);
    let stored = tasks
        .find_owned(ada.id(), task.id())
        .await?
        .ok_or("task vanished")?;
    assert_eq!(stored.status(), TaskStatus::Completed);
    assert_eq!(stored.priority(), TaskPriority::Medium);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_owner_is_rejected(
    #[future] schema: Result<Option<TestSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(db) = schema.await? else {
        return Ok(());
    };
    let task = new_task(UserId::new(), "Orphan")?;

    let result = db.tasks().store(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::UnknownOwner(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_is_case_insensitive_and_literal(
    #[future] schema: Result<Option<TestSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(db) = schema.await? else {
        return Ok(());
    };
    let users = db.users();
    let tasks = db.tasks();
    let ada = insert_user(&users, "Ada").await?;
    for title in ["Buy MILK", "Reach 100% coverage", "Laundry"] {
        tasks.store(&new_task(ada.id(), title)?).await?;
    }

    let milk = tasks.search_titles(ada.id(), "milk").await?;
    let percent = tasks.search_titles(ada.id(), "%").await?;

    assert_eq!(milk.len(), 1);
    assert_eq!(percent.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_are_newest_first_and_counts_tally(
    #[future] schema: Result<Option<TestSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(db) = schema.await? else {
        return Ok(());
    };
    let users = db.users();
    let tasks = db.tasks();
    let ada = insert_user(&users, "Ada").await?;
    let bob = insert_user(&users, "Bob").await?;
    let first = new_task(ada.id(), "First")?;
    let second = new_task(ada.id(), "Second")?;
    tasks.store(&first).await?;
    tasks.store(&second).await?;
    tasks
        .apply_patch(ada.id(), first.id(), &completion_patch(), Utc::now())
        .await?;

    let listed: Vec<_> = tasks
        .list_by_owner(ada.id())
        .await?
        .iter()
        .map(Task::id)
        .collect();
    assert_eq!(listed, vec![second.id(), first.id()]);

    let counts = tasks.completion_counts(&[ada.id(), bob.id()]).await?;
    let ada_counts = counts.get(&ada.id()).copied().unwrap_or_default();
    assert_eq!((ada_counts.completed, ada_counts.incomplete), (1, 1));
    let bob_counts = counts.get(&bob.id()).copied().unwrap_or_default();
    assert_eq!((bob_counts.completed, bob_counts.incomplete), (0, 0));

    let pending = tasks.list_all_by_status(TaskStatus::Pending).await?;
    assert_eq!(pending.len(), 1);
    Ok(())
}
