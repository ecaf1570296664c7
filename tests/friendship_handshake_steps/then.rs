//! Then steps for friendship handshake BDD scenarios.

use super::world::{FriendshipWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskmate::friendship::services::{FriendRequestOutcome, FriendshipError};

fn friendship_between(world: &FriendshipWorld, a: &str, b: &str) -> Result<bool, eyre::Report> {
    let first = world.user(a)?;
    let second = world.user(b)?;
    run_async(world.friendship.are_friends(first, second)).wrap_err("check friendship")
}

#[then(r#""{a}" and "{b}" are friends"#)]
fn are_friends(world: &FriendshipWorld, a: String, b: String) -> Result<(), eyre::Report> {
    eyre::ensure!(friendship_between(world, &a, &b)?, "{a} and {b} are not friends");
    eyre::ensure!(friendship_between(world, &b, &a)?, "friendship is not mutual");
    Ok(())
}

#[then(r#""{a}" and "{b}" are not friends"#)]
fn are_not_friends(world: &FriendshipWorld, a: String, b: String) -> Result<(), eyre::Report> {
    eyre::ensure!(!friendship_between(world, &a, &b)?, "{a} and {b} are friends");
    Ok(())
}

#[then(r#""{owner}" lists "{friend}" as a friend"#)]
fn lists_friend(world: &FriendshipWorld, owner: String, friend: String) -> Result<(), eyre::Report> {
    let owner_id = world.user(&owner)?;
    let friend_id = world.user(&friend)?;
    let friends = run_async(world.friendship.list_friends(owner_id)).wrap_err("list friends")?;
    eyre::ensure!(
        friends.iter().any(|user| user.id() == friend_id),
        "{owner} does not list {friend}"
    );
    Ok(())
}

#[then(r#""{name}" has no pending requests"#)]
fn no_pending_requests(world: &FriendshipWorld, name: String) -> Result<(), eyre::Report> {
    pending_count_is(world, &name, 0)
}

#[then(r#""{name}" has {count:usize} pending request"#)]
fn pending_requests(world: &FriendshipWorld, name: String, count: usize) -> Result<(), eyre::Report> {
    pending_count_is(world, &name, count)
}

fn pending_count_is(world: &FriendshipWorld, name: &str, count: usize) -> Result<(), eyre::Report> {
    let user_id = world.user(name)?;
    let pending = run_async(world.friendship.list_pending_incoming(user_id))
        .wrap_err("list pending requests")?;
    eyre::ensure!(
        pending.len() == count,
        "expected {count} pending requests for {name}, found {}",
        pending.len()
    );
    Ok(())
}

#[then("the last request was already present")]
fn last_request_already_present(world: &FriendshipWorld) -> Result<(), eyre::Report> {
    match world.last_request.as_ref() {
        Some(Ok(FriendRequestOutcome::AlreadyPresent)) => Ok(()),
        other => Err(eyre::eyre!("expected AlreadyPresent, got {other:?}")),
    }
}

#[then("the friend graph holds {count:usize} edge")]
fn graph_holds_edges(world: &FriendshipWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.edges.edge_count().wrap_err("count edges")?;
    eyre::ensure!(stored == count, "expected {count} edges, found {stored}");
    Ok(())
}

#[then("the acceptance fails because no request is pending")]
fn acceptance_fails(world: &FriendshipWorld) -> Result<(), eyre::Report> {
    match world.last_acceptance.as_ref() {
        Some(Err(FriendshipError::NoPendingRequest { .. })) => Ok(()),
        other => Err(eyre::eyre!("expected NoPendingRequest, got {other:?}")),
    }
}

#[then("the request fails because the target is unknown")]
fn request_target_unknown(world: &FriendshipWorld) -> Result<(), eyre::Report> {
    match world.last_request.as_ref() {
        Some(Err(FriendshipError::TargetNotFound(_))) => Ok(()),
        other => Err(eyre::eyre!("expected TargetNotFound, got {other:?}")),
    }
}
