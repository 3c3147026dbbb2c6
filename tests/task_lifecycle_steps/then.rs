//! Then steps for task lifecycle BDD scenarios.

use super::world::TaskLifecycleWorld;
use majordomo::task::{
    domain::{TaskDomainError, TaskStatus},
    services::IntakeError,
};
use rstest_bdd_macros::then;

#[then("the client receives a task id")]
fn client_receives_task_id(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    if world.last_receipt.is_none() {
        return Err(eyre::eyre!("expected a creation receipt"));
    }
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.current_task()?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the task records {count:u64} events")]
fn task_records_events(world: &TaskLifecycleWorld, count: u64) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    let actual = u64::try_from(task.events().len()).unwrap_or(u64::MAX);
    if actual != count {
        return Err(eyre::eyre!("expected {count} events, found {actual}"));
    }
    Ok(())
}

#[then("the submission fails validation")]
fn submission_fails_validation(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    if !matches!(
        world.last_create_error,
        Some(IntakeError::Domain(TaskDomainError::EmptyDescription))
    ) {
        return Err(eyre::eyre!(
            "expected an empty-description validation error, got {:?}",
            world.last_create_error
        ));
    }
    Ok(())
}

#[then("outreach was recorded for {count:u64} vendors")]
fn outreach_recorded_for_vendors(
    world: &TaskLifecycleWorld,
    count: u64,
) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    let actual = u64::try_from(task.vendors().len()).unwrap_or(u64::MAX);
    if actual != count {
        return Err(eyre::eyre!("expected {count} vendors, found {actual}"));
    }
    if task.emails_sent() != count {
        return Err(eyre::eyre!(
            "expected {count} emails sent, found {}",
            task.emails_sent()
        ));
    }
    Ok(())
}

#[then("the task records an error message")]
fn task_records_error_message(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    if task.error_message().is_none() {
        return Err(eyre::eyre!("expected an error message on the task"));
    }
    Ok(())
}
