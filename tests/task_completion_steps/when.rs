//! When steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, run_async};
use rstest_bdd_macros::when;
use taskmate::task::services::UpdateTaskRequest;

#[when(r#""{name}" marks the task as "{status}""#)]
fn marks_task(world: &mut TaskCompletionWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let caller = world.user(&name)?;
    let task_id = world.task()?.id();
    let request = UpdateTaskRequest::new(caller, task_id).with_status(status);
    world.last_outcome = Some(run_async(world.tasks.update(request)));
    Ok(())
}

#[when(r#""{name}" submits an update without fields"#)]
fn submits_empty_update(world: &mut TaskCompletionWorld, name: String) -> Result<(), eyre::Report> {
    let caller = world.user(&name)?;
    let task_id = world.task()?.id();
    world.last_outcome = Some(run_async(
        world.tasks.update(UpdateTaskRequest::new(caller, task_id)),
    ));
    Ok(())
}
