//! In-memory adapter holding both tables behind one lock.
//!
//! A single [`RwLock`] guards projects and tasks together so the cascade on
//! project deletion, the project check on task creation and the overdue
//! batch update are each one critical section.

mod project;
mod task;

use crate::project::domain::{Project, ProjectId};
use crate::task::domain::{Task, TaskId};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory store implementing both repository ports.
///
/// Identifiers are issued from per-table counters starting at 1. Task
/// creation timestamps come from the store's clock.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Default)]
struct StoreState {
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
    last_project_id: i64,
    last_task_id: i64,
}

impl StoreState {
    const fn next_project_id(&mut self) -> ProjectId {
        self.last_project_id += 1;
        ProjectId::new(self.last_project_id)
    }

    const fn next_task_id(&mut self) -> TaskId {
        self.last_task_id += 1;
        TaskId::new(self.last_task_id)
    }
}

impl InMemoryStore {
    /// Creates an empty store stamping tasks with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }

    /// Creates an empty store stamping tasks with the given clock.
    #[must_use]
    pub fn with_clock(clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            clock: Arc::new(clock),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Converts a collection length into a row count.
fn row_count(len: usize) -> Result<u64, std::num::TryFromIntError> {
    u64::try_from(len)
}
