//! [`ProjectRepository`] implementation for [`InMemoryStore`].

use super::{InMemoryStore, StoreState, row_count};
use crate::project::{
    domain::{NewProject, PersistedProjectData, Project, ProjectChanges, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;

/// Returns the project whose name matches ignoring case, if any.
fn project_named<'a>(state: &'a StoreState, name: &str) -> Option<&'a Project> {
    state
        .projects
        .values()
        .find(|project| project.name().matches_ignoring_case(name))
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn create(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if project_named(&state, project.name().as_str()).is_some() {
            return Err(ProjectRepositoryError::DuplicateName(
                project.name().as_str().to_owned(),
            ));
        }

        let id = state.next_project_id();
        let stored = Project::from_persisted(PersistedProjectData {
            id,
            name: project.name().clone(),
            description: project.description().clone(),
        });
        state.projects.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(project_named(&state, name).cloned())
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.values().cloned().collect())
    }

    async fn count(&self) -> ProjectRepositoryResult<u64> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        row_count(state.projects.len()).map_err(ProjectRepositoryError::persistence)
    }

    async fn update(
        &self,
        id: ProjectId,
        changes: &ProjectChanges,
    ) -> ProjectRepositoryResult<Project> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if !state.projects.contains_key(&id) {
            return Err(ProjectRepositoryError::NotFound(id));
        }

        if let Some(name) = &changes.name
            && project_named(&state, name.as_str()).is_some_and(|other| other.id() != id)
        {
            return Err(ProjectRepositoryError::DuplicateName(
                name.as_str().to_owned(),
            ));
        }

        let project = state
            .projects
            .get_mut(&id)
            .ok_or(ProjectRepositoryError::NotFound(id))?;
        project.apply(changes);
        Ok(project.clone())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if state.projects.remove(&id).is_none() {
            return Err(ProjectRepositoryError::NotFound(id));
        }
        state.tasks.retain(|_, task| task.project_id() != id);
        Ok(())
    }
}
