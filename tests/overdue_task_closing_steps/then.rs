//! Then steps for overdue task closing BDD scenarios.

use super::world::{OverdueWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::task::domain::{Task, TaskStatus};

fn load_task(world: &OverdueWorld, title: &str) -> Result<Task, eyre::Report> {
    let id = world.task_id(title)?;
    run_async(world.board.tasks().find_by_id(id))
        .map_err(|err| eyre::eyre!("load task '{title}': {err}"))
}

#[then("{count:u64} task is closed")]
fn tasks_closed(world: &OverdueWorld, count: u64) -> Result<(), eyre::Report> {
    let closed = world
        .last_closed
        .ok_or_else(|| eyre::eyre!("the overdue sweep never ran"))?;
    eyre::ensure!(closed == count, "expected {count} closed tasks, got {closed}");
    Ok(())
}

#[then(r#"the task "{title}" has status "{status}""#)]
fn task_has_status(
    world: &OverdueWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = load_task(world, &title)?;
    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the task "{title}" records when it was closed"#)]
fn task_records_close_time(world: &OverdueWorld, title: String) -> Result<(), eyre::Report> {
    let task = load_task(world, &title)?;
    let closed_at = task
        .closed_at()
        .ok_or_else(|| eyre::eyre!("task '{title}' has no close timestamp"))?;
    let deadline = task
        .deadline()
        .ok_or_else(|| eyre::eyre!("task '{title}' has no deadline"))?;
    eyre::ensure!(
        deadline.is_before(closed_at),
        "task closed at {closed_at} before its deadline {deadline}"
    );
    Ok(())
}

#[then(r#"the task "{title}" has no close timestamp"#)]
fn task_has_no_close_time(world: &OverdueWorld, title: String) -> Result<(), eyre::Report> {
    let task = load_task(world, &title)?;
    eyre::ensure!(
        task.closed_at().is_none(),
        "task '{title}' was auto-closed at {:?}",
        task.closed_at()
    );
    Ok(())
}

#[then("the task is rejected for an invalid deadline")]
fn task_rejected_for_deadline(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_add_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no task was added in this scenario"))?;
    match result {
        Err(err) if err.is_invalid_deadline() => Ok(()),
        other => Err(eyre::eyre!("expected an invalid deadline error, got {other:?}")),
    }
}
