//! Repository port for project persistence and lookup.
//!
//! Implementations hold no business rules: uniqueness and capacity are
//! checked by the service. The storage-level unique index on the lowered
//! name only backstops races between concurrent creators.

use crate::project::domain::{NewProject, Project, ProjectChanges, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateName`] when another
    /// project already uses the name, ignoring case.
    async fn create(&self, project: &NewProject) -> ProjectRepositoryResult<Project>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Finds a project whose name equals `name` ignoring case.
    ///
    /// Returns `None` when no project matches.
    async fn find_by_name(&self, name: &str) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns every project ordered by identifier ascending.
    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns the number of stored projects.
    async fn count(&self) -> ProjectRepositoryResult<u64>;

    /// Applies a partial update and returns the refreshed project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist or [`ProjectRepositoryError::DuplicateName`] when the new name
    /// collides with another project.
    async fn update(
        &self,
        id: ProjectId,
        changes: &ProjectChanges,
    ) -> ProjectRepositoryResult<Project>;

    /// Deletes a project together with all of its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// Another project already uses the name, ignoring case.
    #[error("duplicate project name: {0}")]
    DuplicateName(String),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
