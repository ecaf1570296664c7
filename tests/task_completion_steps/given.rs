//! Given steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskmate::task::services::CreateTaskRequest;
use taskmate::user::services::RegisterUserRequest;

#[given(r#"a registered user "{name}""#)]
fn registered_user(world: &mut TaskCompletionWorld, name: String) -> Result<(), eyre::Report> {
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

#[given(r#""{name}" is listening for notifications"#)]
fn listening_for_notifications(
    world: &mut TaskCompletionWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let user_id = world.user(&name)?;
    let subscription = world.hub.connect(user_id);
    world.listeners.insert(name, subscription);
    Ok(())
}

#[given(r#""{name}" owns a task titled "{title}""#)]
fn owns_task(world: &mut TaskCompletionWorld, name: String, title: String) -> Result<(), eyre::Report> {
    let owner = world.user(&name)?;
    let task = run_async(
        world
            .tasks
            .create(CreateTaskRequest::new(owner, title, "2026-12-31")),
    )
    .wrap_err("create scenario task")?;
    world.task = Some(task);
    Ok(())
}
