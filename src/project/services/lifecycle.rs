//! Service layer for project creation, editing, deletion and lookup.

use crate::project::{
    domain::{NewProject, Project, ProjectChanges, ProjectDomainError, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
}

impl CreateProjectRequest {
    /// Creates a request with both required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Request payload for a partial project edit.
///
/// Fields left unset keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProjectRequest {
    id: ProjectId,
    name: Option<String>,
    description: Option<String>,
}

impl EditProjectRequest {
    /// Creates an edit request that changes nothing yet.
    #[must_use]
    pub const fn new(id: ProjectId) -> Self {
        Self {
            id,
            name: None,
            description: None,
        }
    }

    /// Sets the replacement name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Field validation failed.
    #[error(transparent)]
    Validation(#[from] ProjectDomainError),

    /// The requested project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Another project already uses the name, ignoring case.
    #[error("a project named '{0}' already exists")]
    NameExists(String),

    /// The configured project capacity has been reached.
    #[error("cannot create more than {limit} projects")]
    LimitExceeded {
        /// Configured maximum number of projects.
        limit: u64,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(ProjectRepositoryError),
}

impl From<ProjectRepositoryError> for ProjectServiceError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::DuplicateName(name) => Self::NameExists(name),
            ProjectRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project lifecycle orchestration service.
#[derive(Clone)]
pub struct ProjectLifecycleService<R>
where
    R: ProjectRepository,
{
    repository: Arc<R>,
    max_projects: u64,
}

impl<R> ProjectLifecycleService<R>
where
    R: ProjectRepository,
{
    /// Creates a new project service with the given capacity.
    #[must_use]
    pub const fn new(repository: Arc<R>, max_projects: u64) -> Self {
        Self {
            repository,
            max_projects,
        }
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Validation`] for invalid fields,
    /// [`ProjectServiceError::NameExists`] when the name is taken ignoring
    /// case, or [`ProjectServiceError::LimitExceeded`] when the configured
    /// capacity has been reached.
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectServiceResult<Project> {
        let CreateProjectRequest { name, description } = request;
        let candidate = NewProject::new(name, description)?;

        if self
            .repository
            .find_by_name(candidate.name().as_str())
            .await?
            .is_some()
        {
            return Err(ProjectServiceError::NameExists(
                candidate.name().as_str().to_owned(),
            ));
        }

        let current = self.repository.count().await?;
        debug!(current, limit = self.max_projects, "checking project capacity");
        if current >= self.max_projects {
            warn!(limit = self.max_projects, "project capacity reached");
            return Err(ProjectServiceError::LimitExceeded {
                limit: self.max_projects,
            });
        }

        let project = self.repository.create(&candidate).await?;
        info!(project_id = %project.id(), name = %project.name(), "project created");
        Ok(project)
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist.
    pub async fn find_by_id(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }

    /// Applies a partial edit.
    ///
    /// The merged state (stored values overridden by supplied ones) is
    /// validated as a whole before anything is written; only supplied fields
    /// are persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`],
    /// [`ProjectServiceError::Validation`] or
    /// [`ProjectServiceError::NameExists`].
    pub async fn edit(&self, request: EditProjectRequest) -> ProjectServiceResult<Project> {
        let EditProjectRequest {
            id,
            name,
            description,
        } = request;
        let current = self.find_by_id(id).await?;

        let name_supplied = name.is_some();
        let description_supplied = description.is_some();
        let candidate = NewProject::new(
            name.unwrap_or_else(|| current.name().as_str().to_owned()),
            description.unwrap_or_else(|| current.description().as_str().to_owned()),
        )?;

        if name_supplied
            && !current
                .name()
                .matches_ignoring_case(candidate.name().as_str())
        {
            let collision = self
                .repository
                .find_by_name(candidate.name().as_str())
                .await?;
            if collision.is_some_and(|other| other.id() != id) {
                return Err(ProjectServiceError::NameExists(
                    candidate.name().as_str().to_owned(),
                ));
            }
        }

        let (merged_name, merged_description) = candidate.into_parts();
        let changes = ProjectChanges {
            name: name_supplied.then_some(merged_name),
            description: description_supplied.then_some(merged_description),
        };
        let project = self.repository.update(id, &changes).await?;
        info!(project_id = %id, "project updated");
        Ok(project)
    }

    /// Deletes a project and, through the store, all of its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist.
    pub async fn delete(&self, id: ProjectId) -> ProjectServiceResult<()> {
        self.find_by_id(id).await?;
        self.repository.delete(id).await?;
        info!(project_id = %id, "project deleted");
        Ok(())
    }

    /// Returns every project ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when the lookup fails.
    pub async fn list_all(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.list_all().await?)
    }
}
