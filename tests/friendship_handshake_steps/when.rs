//! When steps for friendship handshake BDD scenarios.

use super::world::{FriendshipWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#""{name}" sends a friend request to "{email}""#)]
fn sends_request(world: &mut FriendshipWorld, name: String, email: String) -> Result<(), eyre::Report> {
    let requester = world.user(&name)?;
    world.last_request = Some(run_async(world.friendship.send_request(requester, &email)));
    Ok(())
}

#[when(r#""{accepter}" accepts the request from "{requester}""#)]
fn accepts_request(
    world: &mut FriendshipWorld,
    accepter: String,
    requester: String,
) -> Result<(), eyre::Report> {
    let accepter_id = world.user(&accepter)?;
    let requester_id = world.user(&requester)?;
    world.last_acceptance = Some(run_async(
        world.friendship.accept_request(accepter_id, requester_id),
    ));
    Ok(())
}
