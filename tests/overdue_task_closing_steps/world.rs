//! Shared world state for overdue task closing BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use crate::test_helpers::ManualClock;
use chrono::{TimeZone, Utc};
use rstest::fixture;
use taskboard::app::Taskboard;
use taskboard::config::TaskboardConfig;
use taskboard::project::domain::Project;
use taskboard::storage::memory::InMemoryStore;
use taskboard::task::{
    domain::{Task, TaskId},
    services::TaskServiceError,
};

/// Services used by the BDD world.
pub type ScenarioBoard = Taskboard<InMemoryStore, InMemoryStore, ManualClock>;

/// Scenario world for overdue sweep behaviour tests.
pub struct OverdueWorld {
    pub board: ScenarioBoard,
    pub clock: ManualClock,
    pub project: Option<Project>,
    pub tasks_by_title: HashMap<String, TaskId>,
    pub last_closed: Option<u64>,
    pub last_add_result: Option<Result<Task, TaskServiceError>>,
}

impl OverdueWorld {
    /// Creates a world with an empty store and a clock at a fixed instant.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 6, 1, 8, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let clock = ManualClock::at(start);
        let store = Arc::new(InMemoryStore::with_clock(clock.clone()));
        let board = Taskboard::new(
            &TaskboardConfig::default(),
            Arc::clone(&store),
            store,
            Arc::new(clock.clone()),
        );

        Self {
            board,
            clock,
            project: None,
            tasks_by_title: HashMap::new(),
            last_closed: None,
            last_add_result: None,
        }
    }

    /// Returns the project created by the scenario.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Looks up a task created earlier in the scenario by its title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled '{title}' in scenario world"))
    }
}

impl Default for OverdueWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OverdueWorld {
    OverdueWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
