//! Application services for task lifecycle orchestration.

mod lifecycle;
mod overdue;

pub use lifecycle::{
    AddTaskRequest, EditTaskRequest, TaskLifecycleService, TaskServiceError, TaskServiceResult,
};
pub use overdue::OverdueTaskCloser;
