//! [`TaskRepository`] implementation for [`InMemoryStore`].

use super::{InMemoryStore, row_count};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskChanges, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let created_at = self.clock.utc();
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if !state.projects.contains_key(&task.project_id()) {
            return Err(TaskRepositoryError::ProjectMissing(task.project_id()));
        }

        let id = state.next_task_id();
        let stored = Task::from_persisted(PersistedTaskData {
            id,
            project_id: task.project_id(),
            title: task.title().clone(),
            description: task.description().clone(),
            status: TaskStatus::Todo,
            deadline: task.deadline(),
            created_at,
            closed_at: None,
        });
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<u64> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let owned = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .count();
        row_count(owned).map_err(TaskRepositoryError::persistence)
    }

    async fn update(&self, id: TaskId, changes: &TaskChanges) -> TaskRepositoryResult<Task> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.apply(changes);
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn close_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<u64> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let mut closed = 0_u64;
        for task in state.tasks.values_mut() {
            if task.close_if_overdue(now) {
                closed += 1;
            }
        }
        Ok(closed)
    }
}
