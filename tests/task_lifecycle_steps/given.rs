//! Given steps for task lifecycle BDD scenarios.

use std::sync::atomic::Ordering;

use super::world::TaskLifecycleWorld;
use rstest_bdd_macros::given;

#[given(r#"a homeowner request "{description}""#)]
fn homeowner_request(world: &mut TaskLifecycleWorld, description: String) {
    world.description = Some(description);
}

#[given("an empty homeowner request")]
fn empty_homeowner_request(world: &mut TaskLifecycleWorld) {
    world.description = Some(String::new());
}

#[given("the request has been submitted")]
fn request_has_been_submitted(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    world.submit()?;
    if world.last_receipt.is_none() {
        return Err(eyre::eyre!("scenario setup expected a successful submission"));
    }
    Ok(())
}

#[given("the agent runtime is unavailable")]
fn agent_runtime_unavailable(world: &mut TaskLifecycleWorld) {
    world.agent_down.store(true, Ordering::SeqCst);
}
