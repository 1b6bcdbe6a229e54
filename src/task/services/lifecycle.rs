//! Service layer for task creation, editing, deletion and lookup.

use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{
        Deadline, DeadlineUpdate, NewTask, Task, TaskChanges, TaskContent, TaskDomainError,
        TaskId, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for adding a task to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    deadline: Option<Deadline>,
}

impl AddTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: description.into(),
            deadline: None,
        }
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Request payload for a partial task edit.
///
/// Fields left unset keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    id: TaskId,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    deadline: DeadlineUpdate,
}

impl EditTaskRequest {
    /// Creates an edit request that changes nothing yet.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            status: None,
            deadline: DeadlineUpdate::Keep,
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement status; parsed when the edit runs.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the replacement deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = DeadlineUpdate::Set(deadline);
        self
    }

    /// Removes the deadline.
    #[must_use]
    pub const fn clear_deadline(mut self) -> Self {
        self.deadline = DeadlineUpdate::Clear;
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Field, status or deadline validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The requested task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The project already holds the configured maximum number of tasks.
    #[error("project {project_id} already holds the maximum of {limit} tasks")]
    TaskLimitExceeded {
        /// Project that is full.
        project_id: ProjectId,
        /// Configured maximum number of tasks per project.
        limit: u64,
    },

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),

    /// Project repository lookup failed.
    #[error(transparent)]
    ProjectRepository(ProjectRepositoryError),
}

impl TaskServiceError {
    /// Returns `true` for any validation failure, including deadlines.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` when a deadline was rejected for being in the past.
    #[must_use]
    pub const fn is_invalid_deadline(&self) -> bool {
        matches!(
            self,
            Self::Validation(TaskDomainError::DeadlineInPast { .. })
        )
    }
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::ProjectMissing(project_id) => Self::ProjectNotFound(project_id),
            other => Self::Repository(other),
        }
    }
}

impl From<ProjectRepositoryError> for TaskServiceError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound(project_id) => Self::ProjectNotFound(project_id),
            other => Self::ProjectRepository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
///
/// The project repository is consulted only to confirm that a project
/// exists; it is never mutated from here.
#[derive(Clone)]
pub struct TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
    max_tasks_per_project: u64,
}

impl<T, P, C> TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service with the given per-project capacity.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        projects: Arc<P>,
        clock: Arc<C>,
        max_tasks_per_project: u64,
    ) -> Self {
        Self {
            tasks,
            projects,
            clock,
            max_tasks_per_project,
        }
    }

    /// Adds a task to a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for invalid text or a past
    /// deadline, [`TaskServiceError::ProjectNotFound`] when the project does
    /// not exist, or [`TaskServiceError::TaskLimitExceeded`] when the project
    /// is full.
    pub async fn add_to_project(&self, request: AddTaskRequest) -> TaskServiceResult<Task> {
        let AddTaskRequest {
            project_id,
            title,
            description,
            deadline,
        } = request;

        let content = TaskContent::new(title, description)?;
        if let Some(requested) = deadline {
            requested.ensure_not_past(&*self.clock)?;
        }

        self.ensure_project_exists(project_id).await?;

        let current = self.tasks.count_by_project(project_id).await?;
        debug!(
            %project_id,
            current,
            limit = self.max_tasks_per_project,
            "checking task capacity"
        );
        if current >= self.max_tasks_per_project {
            warn!(%project_id, limit = self.max_tasks_per_project, "task capacity reached");
            return Err(TaskServiceError::TaskLimitExceeded {
                project_id,
                limit: self.max_tasks_per_project,
            });
        }

        let mut new_task = NewTask::new(project_id, content);
        if let Some(requested) = deadline {
            new_task = new_task.with_deadline(requested);
        }
        let task = self.tasks.create(&new_task).await?;
        info!(task_id = %task.id(), %project_id, "task created");
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    pub async fn find_by_id(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Applies a partial edit.
    ///
    /// The merged text fields are validated together, a supplied status must
    /// parse, and a supplied deadline must not be in the past. Only supplied
    /// fields are persisted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] or
    /// [`TaskServiceError::Validation`].
    pub async fn edit(&self, request: EditTaskRequest) -> TaskServiceResult<Task> {
        let EditTaskRequest {
            id,
            title,
            description,
            status,
            deadline,
        } = request;
        let current = self.find_by_id(id).await?;

        let title_supplied = title.is_some();
        let description_supplied = description.is_some();
        let content = TaskContent::new(
            title.unwrap_or_else(|| current.title().as_str().to_owned()),
            description.unwrap_or_else(|| current.description().as_str().to_owned()),
        )?;
        let parsed_status = status
            .map(|raw| TaskStatus::try_from(raw.as_str()))
            .transpose()
            .map_err(TaskDomainError::from)?;
        if let DeadlineUpdate::Set(requested) = deadline {
            requested.ensure_not_past(&*self.clock)?;
        }

        let (merged_title, merged_description) = content.into_parts();
        let changes = TaskChanges {
            title: title_supplied.then_some(merged_title),
            description: description_supplied.then_some(merged_description),
            status: parsed_status,
            deadline: deadline.replacement(),
        };
        let task = self.tasks.update(id, &changes).await?;
        info!(task_id = %id, status = %task.status(), "task updated");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        self.find_by_id(id).await?;
        self.tasks.delete(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Returns the tasks of a project ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] when the project does
    /// not exist.
    pub async fn list_for_project(&self, project_id: ProjectId) -> TaskServiceResult<Vec<Task>> {
        self.ensure_project_exists(project_id).await?;
        Ok(self.tasks.list_by_project(project_id).await?)
    }

    async fn ensure_project_exists(&self, project_id: ProjectId) -> TaskServiceResult<()> {
        self.projects
            .find_by_id(project_id)
            .await?
            .map(|_| ())
            .ok_or(TaskServiceError::ProjectNotFound(project_id))
    }
}
