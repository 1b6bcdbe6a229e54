//! Domain model for projects.
//!
//! Field values are validated on construction; a [`Project`] can only be
//! assembled from values that already satisfy the length and emptiness
//! rules.

mod error;
mod ids;
mod project;

pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use project::{
    NewProject, PersistedProjectData, Project, ProjectChanges, ProjectDescription, ProjectName,
};
