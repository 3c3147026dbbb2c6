//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use majordomo::task::ports::HandoffMessage;
use rstest_bdd_macros::when;

#[when("the request is submitted")]
fn request_is_submitted(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    world.submit()
}

#[when("the worker processes the task")]
fn worker_processes_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let receipt = world
        .last_receipt
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation receipt in scenario world"))?;
    let description = world
        .description
        .clone()
        .ok_or_else(|| eyre::eyre!("missing request description in scenario world"))?;

    let message = HandoffMessage::new(receipt.id, description);
    let result = run_async(world.processing.process(&message));
    world.last_process_result = Some(result);
    Ok(())
}
