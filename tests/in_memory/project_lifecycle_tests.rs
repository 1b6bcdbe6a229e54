//! In-memory integration tests for project lifecycle operations.

use super::helpers::{Harness, harness, harness_with};
use rstest::rstest;
use taskboard::config::TaskboardConfig;
use taskboard::project::{
    domain::ProjectId,
    services::{CreateProjectRequest, EditProjectRequest, ProjectServiceError},
};
use taskboard::task::services::{AddTaskRequest, TaskServiceError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_names_are_unique_ignoring_case(harness: Harness) {
    let projects = harness.board.projects();
    projects
        .create(CreateProjectRequest::new("Alpha", "x"))
        .await
        .expect("first project should be created");

    let result = projects.create(CreateProjectRequest::new("alpha", "y")).await;

    assert!(matches!(result, Err(ProjectServiceError::NameExists(_))));
    assert_eq!(projects.list_all().await.expect("listing").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tenth_project_succeeds_and_eleventh_fails(harness: Harness) {
    let projects = harness.board.projects();
    for index in 1..=9 {
        projects
            .create(CreateProjectRequest::new(format!("P{index}"), "seed"))
            .await
            .expect("seed project should be created");
    }

    projects
        .create(CreateProjectRequest::new("P10", "tenth"))
        .await
        .expect("tenth project should be created");
    let eleventh = projects
        .create(CreateProjectRequest::new("P11", "eleventh"))
        .await;

    assert!(matches!(
        eleventh,
        Err(ProjectServiceError::LimitExceeded { limit: 10 })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_project_limit_is_honoured() {
    let harness = harness_with(TaskboardConfig::default().with_max_projects(2));
    let projects = harness.board.projects();
    for name in ["One", "Two"] {
        projects
            .create(CreateProjectRequest::new(name, "seed"))
            .await
            .expect("project within the limit should be created");
    }

    let result = projects.create(CreateProjectRequest::new("Three", "over")).await;

    assert!(matches!(
        result,
        Err(ProjectServiceError::LimitExceeded { limit: 2 })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_project_removes_its_tasks(harness: Harness) {
    let project = harness
        .board
        .projects()
        .create(CreateProjectRequest::new("Alpha", "Owns tasks"))
        .await
        .expect("project should be created");
    let mut task_ids = Vec::new();
    for title in ["One", "Two", "Three"] {
        let task = harness
            .board
            .tasks()
            .add_to_project(AddTaskRequest::new(project.id(), title, "Work"))
            .await
            .expect("task should be created");
        task_ids.push(task.id());
    }

    harness
        .board
        .projects()
        .delete(project.id())
        .await
        .expect("project should be deleted");

    for id in task_ids {
        assert!(matches!(
            harness.board.tasks().find_by_id(id).await,
            Err(TaskServiceError::NotFound(_))
        ));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_keeps_identifier_and_frees_old_name(harness: Harness) {
    let projects = harness.board.projects();
    let created = projects
        .create(CreateProjectRequest::new("Alpha", "x"))
        .await
        .expect("project should be created");

    let renamed = projects
        .edit(EditProjectRequest::new(created.id()).with_name("Gamma"))
        .await
        .expect("rename should succeed");
    projects
        .create(CreateProjectRequest::new("ALPHA", "reuses the old name"))
        .await
        .expect("old name should be free again");

    assert_eq!(renamed.id(), created.id());
    assert_eq!(renamed.description().as_str(), "x");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_is_not_found(harness: Harness) {
    let result = harness.board.projects().find_by_id(ProjectId::new(999)).await;

    assert!(matches!(result, Err(ProjectServiceError::NotFound(_))));
}
