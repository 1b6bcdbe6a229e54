//! Application services for project lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateProjectRequest, EditProjectRequest, ProjectLifecycleService, ProjectServiceError,
    ProjectServiceResult,
};
