//! In-memory integration tests for friendship and the leaderboard.

use super::helpers::{App, app};
use rstest::rstest;
use taskmate::leaderboard::domain::LeaderboardScope;
use taskmate::task::services::{CreateTaskRequest, UpdateTaskRequest};
use taskmate::user::domain::UserId;

async fn complete_tasks(app: &App, owner: UserId, count: usize) -> Result<(), eyre::Report> {
    for index in 0..count {
        let task = app
            .tasks
            .create(CreateTaskRequest::new(owner, format!("chore {index}"), "2026-11-01"))
            .await?;
        app.tasks
            .update(UpdateTaskRequest::new(owner, task.id()).with_status("Completed"))
            .await?;
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accepted_friends_appear_on_friends_leaderboard(app: App) -> Result<(), eyre::Report> {
    let viewer = app.register("Viewer").await?;
    let carol = app.register("Carol").await?;
    let bob = app.register("Bob").await?;
    let alice = app.register("Alice").await?;
    let outsider = app.register("Outsider").await?;
    complete_tasks(&app, carol, 3).await?;
    complete_tasks(&app, bob, 1).await?;
    complete_tasks(&app, alice, 3).await?;
    complete_tasks(&app, outsider, 7).await?;

    for (friend, email) in [
        (carol, "carol@example.com"),
        (bob, "bob@example.com"),
        (alice, "alice@example.com"),
    ] {
        app.friends.send_request(viewer, email).await?;
        app.friends.accept_request(friend, viewer).await?;
    }
    app.friends.send_request(viewer, "outsider@example.com").await?;

    let ranked = app.leaderboard.rank(LeaderboardScope::Friends, viewer).await?;
    let names: Vec<&str> = ranked.iter().map(|entry| entry.name.as_str()).collect();
    eyre::ensure!(
        names == vec!["Alice", "Carol", "Bob"],
        "unexpected friends ranking {names:?}"
    );

    let global = app.leaderboard.rank_by_selector("global", viewer).await?;
    let top = global
        .first()
        .ok_or_else(|| eyre::eyre!("global leaderboard is empty"))?;
    eyre::ensure!(top.name == "Outsider", "outsider should lead globally");
    eyre::ensure!(global.len() == 5, "global scope should include every user");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn friendship_is_visible_from_both_sides(app: App) -> Result<(), eyre::Report> {
    let ada = app.register("Ada").await?;
    let bob = app.register("Bob").await?;

    app.friends.send_request(ada, "bob@example.com").await?;
    let pending: Vec<UserId> = app
        .friends
        .list_pending_incoming(bob)
        .await?
        .iter()
        .map(|user| user.id())
        .collect();
    eyre::ensure!(pending == vec![ada], "pending request not visible to Bob");

    app.friends.accept_request(bob, ada).await?;
    eyre::ensure!(app.friends.are_friends(ada, bob).await?, "friendship not mutual");
    eyre::ensure!(
        app.friends.list_pending_incoming(bob).await?.is_empty(),
        "accepted request still pending"
    );
    Ok(())
}
