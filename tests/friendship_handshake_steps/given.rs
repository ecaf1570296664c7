//! Given steps for friendship handshake BDD scenarios.

use super::world::{FriendshipWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskmate::user::services::RegisterUserRequest;

#[given(r#"a registered user "{name}""#)]
fn registered_user(world: &mut FriendshipWorld, name: String) -> Result<(), eyre::Report> {
    let email = format!("{}@example.com", name.to_lowercase());
    let user = run_async(
        world
            .users
            .register(RegisterUserRequest::new(name.clone(), email, "argon2-hash")),
    )
    .wrap_err("register scenario user")?;
    world.user_ids.insert(name, user.id());
    Ok(())
}
