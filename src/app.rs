//! Composition root wiring the repositories into the services.

use crate::config::TaskboardConfig;
use crate::project::{ports::ProjectRepository, services::ProjectLifecycleService};
use crate::task::{
    ports::TaskRepository,
    services::{OverdueTaskCloser, TaskLifecycleService},
};
use mockable::Clock;
use std::sync::Arc;

/// Project, task, and overdue-close services sharing one storage gateway.
///
/// The same repository handles are passed to every service, so a project
/// deletion is immediately visible to task operations.
pub struct Taskboard<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: ProjectLifecycleService<P>,
    tasks: TaskLifecycleService<T, P, C>,
    overdue_closer: OverdueTaskCloser<T, C>,
}

impl<P, T, C> Taskboard<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Builds every service from shared repositories and a clock.
    #[must_use]
    pub fn new(config: &TaskboardConfig, projects: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            projects: ProjectLifecycleService::new(Arc::clone(&projects), config.max_projects),
            tasks: TaskLifecycleService::new(
                Arc::clone(&tasks),
                projects,
                Arc::clone(&clock),
                config.max_tasks_per_project,
            ),
            overdue_closer: OverdueTaskCloser::new(tasks, clock),
        }
    }

    /// Returns the project service.
    #[must_use]
    pub const fn projects(&self) -> &ProjectLifecycleService<P> {
        &self.projects
    }

    /// Returns the task service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskLifecycleService<T, P, C> {
        &self.tasks
    }

    /// Returns the overdue closer.
    #[must_use]
    pub const fn overdue_closer(&self) -> &OverdueTaskCloser<T, C> {
        &self.overdue_closer
    }
}
