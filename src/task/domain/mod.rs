//! Domain model for tasks.
//!
//! The task domain covers field validation, the status enumeration, the
//! deadline rule and the overdue predicate. Infrastructure stays outside
//! the domain boundary; time is read through [`mockable::Clock`].

mod deadline;
mod error;
mod ids;
mod status;
mod task;

pub use deadline::{Deadline, DeadlineUpdate};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{
    NewTask, PersistedTaskData, Task, TaskChanges, TaskContent, TaskDescription, TaskTitle,
};
