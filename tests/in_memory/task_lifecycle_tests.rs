//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Harness, harness, harness_with, start_instant};
use chrono::{Days, Duration};
use mockable::Clock;
use rstest::rstest;
use taskboard::config::TaskboardConfig;
use taskboard::project::{domain::Project, services::CreateProjectRequest};
use taskboard::task::{
    domain::{Deadline, TaskStatus},
    services::{AddTaskRequest, EditTaskRequest, TaskServiceError},
};

async fn project(harness: &Harness, name: &str) -> Project {
    harness
        .board
        .projects()
        .create(CreateProjectRequest::new(name, "Project under test"))
        .await
        .expect("project should be created")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn twenty_first_task_is_rejected(harness: Harness) {
    let owner = project(&harness, "Busy").await;
    let tasks = harness.board.tasks();
    for index in 1..=20 {
        tasks
            .add_to_project(AddTaskRequest::new(owner.id(), format!("T{index}"), "Work"))
            .await
            .expect("tasks within capacity should be created");
    }

    let result = tasks
        .add_to_project(AddTaskRequest::new(owner.id(), "T21", "Work"))
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::TaskLimitExceeded { limit: 20, .. })
    ));
    assert_eq!(
        tasks
            .list_for_project(owner.id())
            .await
            .expect("listing should succeed")
            .len(),
        20
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_frees_capacity() {
    let harness = harness_with(TaskboardConfig::default().with_max_tasks_per_project(1));
    let owner = project(&harness, "Tiny").await;
    let tasks = harness.board.tasks();
    let only = tasks
        .add_to_project(AddTaskRequest::new(owner.id(), "Only", "Work"))
        .await
        .expect("first task should be created");

    tasks.delete(only.id()).await.expect("delete should succeed");

    tasks
        .add_to_project(AddTaskRequest::new(owner.id(), "Replacement", "Work"))
        .await
        .expect("freed slot should accept a task");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deadline_rule_compares_local_calendar_dates(harness: Harness) {
    let owner = project(&harness, "Dates").await;
    let tasks = harness.board.tasks();
    let today = harness.clock.local().date_naive();
    let yesterday = today
        .checked_sub_days(Days::new(1))
        .expect("yesterday exists");

    let rejected = tasks
        .add_to_project(
            AddTaskRequest::new(owner.id(), "Yesterday", "Late")
                .with_deadline(Deadline::from_date(yesterday).expect("valid date")),
        )
        .await;
    let accepted = tasks
        .add_to_project(
            AddTaskRequest::new(owner.id(), "Today", "On time")
                .with_deadline(Deadline::from_date(today).expect("valid date")),
        )
        .await;

    assert!(rejected.is_err_and(|err| err.is_invalid_deadline()));
    assert!(accepted.is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_edit_preserves_every_other_field(harness: Harness) {
    let owner = project(&harness, "Edits").await;
    let tasks = harness.board.tasks();
    let deadline = Deadline::at(&(start_instant() + Duration::days(3)));
    let created = tasks
        .add_to_project(
            AddTaskRequest::new(owner.id(), "Review", "Read the draft").with_deadline(deadline),
        )
        .await
        .expect("task should be created");

    let edited = tasks
        .edit(EditTaskRequest::new(created.id()).with_status("done"))
        .await
        .expect("status edit should succeed");

    assert_eq!(edited.status(), TaskStatus::Done);
    assert_eq!(edited.title().as_str(), "Review");
    assert_eq!(edited.description().as_str(), "Read the draft");
    assert_eq!(edited.deadline(), Some(deadline));
    assert_eq!(edited.closed_at(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_cannot_move_to_missing_project(harness: Harness) {
    let owner = project(&harness, "Gone").await;
    harness
        .board
        .projects()
        .delete(owner.id())
        .await
        .expect("delete should succeed");

    let result = harness
        .board
        .tasks()
        .add_to_project(AddTaskRequest::new(owner.id(), "Late arrival", "Work"))
        .await;

    assert!(matches!(result, Err(TaskServiceError::ProjectNotFound(_))));
}
