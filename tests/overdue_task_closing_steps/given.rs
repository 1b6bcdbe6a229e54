//! Given steps for overdue task closing BDD scenarios.

use super::world::{OverdueWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::given;
use taskboard::project::services::CreateProjectRequest;
use taskboard::task::{
    domain::Deadline,
    services::{AddTaskRequest, EditTaskRequest},
};

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut OverdueWorld, name: String) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .board
            .projects()
            .create(CreateProjectRequest::new(name, "Scenario project")),
    )
    .wrap_err("create scenario project")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"a task "{title}" due in {hours:u64} hours"#)]
fn task_due_in(world: &mut OverdueWorld, title: String, hours: u64) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let offset = Duration::hours(i64::try_from(hours)?);
    let deadline = Deadline::at(&(world.clock.utc() + offset));
    let request =
        AddTaskRequest::new(project_id, title.clone(), "Scenario task").with_deadline(deadline);
    let task = run_async(world.board.tasks().add_to_project(request))
        .wrap_err("add scenario task with deadline")?;
    world.tasks_by_title.insert(title, task.id());
    Ok(())
}

#[given(r#"a task "{title}" with no deadline"#)]
fn task_without_deadline(world: &mut OverdueWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let request = AddTaskRequest::new(project_id, title.clone(), "Scenario task");
    let task = run_async(world.board.tasks().add_to_project(request))
        .wrap_err("add scenario task without deadline")?;
    world.tasks_by_title.insert(title, task.id());
    Ok(())
}

#[given(r#"the task "{title}" is marked "{status}""#)]
fn task_marked(
    world: &mut OverdueWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    run_async(
        world
            .board
            .tasks()
            .edit(EditTaskRequest::new(id).with_status(status)),
    )
    .wrap_err("edit scenario task status")?;
    Ok(())
}
