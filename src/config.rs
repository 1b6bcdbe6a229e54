//! Capacity limits for the taskboard services.
//!
//! Limits default to ten projects and twenty tasks per project. They can be
//! overridden through `MAX_PROJECTS` and `MAX_TASKS_PER_PROJECT`; a value that
//! does not parse as a non-negative integer is ignored with a warning.

use tracing::warn;

/// Environment variable overriding [`TaskboardConfig::max_projects`].
pub const MAX_PROJECTS_VAR: &str = "MAX_PROJECTS";

/// Environment variable overriding [`TaskboardConfig::max_tasks_per_project`].
pub const MAX_TASKS_PER_PROJECT_VAR: &str = "MAX_TASKS_PER_PROJECT";

const DEFAULT_MAX_PROJECTS: u64 = 10;
const DEFAULT_MAX_TASKS_PER_PROJECT: u64 = 20;

/// Capacity configuration shared by the lifecycle services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskboardConfig {
    /// Maximum number of projects in the store.
    pub max_projects: u64,
    /// Maximum number of tasks in any single project.
    pub max_tasks_per_project: u64,
}

impl Default for TaskboardConfig {
    fn default() -> Self {
        Self {
            max_projects: DEFAULT_MAX_PROJECTS,
            max_tasks_per_project: DEFAULT_MAX_TASKS_PER_PROJECT,
        }
    }
}

impl TaskboardConfig {
    /// Returns a copy with a different project limit.
    #[must_use]
    pub const fn with_max_projects(mut self, limit: u64) -> Self {
        self.max_projects = limit;
        self
    }

    /// Returns a copy with a different per-project task limit.
    #[must_use]
    pub const fn with_max_tasks_per_project(mut self, limit: u64) -> Self {
        self.max_tasks_per_project = limit;
        self
    }

    /// Builds a configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// Missing keys keep their defaults. Unparseable values keep their
    /// defaults and emit a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_projects: limit_from(&lookup, MAX_PROJECTS_VAR, defaults.max_projects),
            max_tasks_per_project: limit_from(
                &lookup,
                MAX_TASKS_PER_PROJECT_VAR,
                defaults.max_tasks_per_project,
            ),
        }
    }
}

fn limit_from(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    let Some(raw) = lookup(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = %raw, default, "ignoring invalid capacity limit");
        default
    })
}
