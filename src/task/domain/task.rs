//! Task aggregate root and its validated fields.

use super::{Deadline, TaskDomainError, TaskId, TaskStatus};
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum task title length, matching the `VARCHAR(100)` column.
const MAX_TITLE_LENGTH: usize = 100;

/// Maximum task description length, matching the `VARCHAR(500)` column.
const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Checks blankness and character length.
///
/// `Err(None)` means blank, `Err(Some(length))` means too long.
fn check_text(raw: &str, max: usize) -> Result<(), Option<usize>> {
    if raw.trim().is_empty() {
        return Err(None);
    }
    let length = raw.chars().count();
    if length > max {
        return Err(Some(length));
    }
    Ok(())
}

/// Validated task title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::TitleTooLong`] (over 100 characters).
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        match check_text(&raw, MAX_TITLE_LENGTH) {
            Ok(()) => Ok(Self(raw)),
            Err(None) => Err(TaskDomainError::EmptyTitle),
            Err(Some(length)) => Err(TaskDomainError::TitleTooLong {
                length,
                max: MAX_TITLE_LENGTH,
            }),
        }
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated task description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] or
    /// [`TaskDomainError::DescriptionTooLong`] (over 500 characters).
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        match check_text(&raw, MAX_DESCRIPTION_LENGTH) {
            Ok(()) => Ok(Self(raw)),
            Err(None) => Err(TaskDomainError::EmptyDescription),
            Err(Some(length)) => Err(TaskDomainError::DescriptionTooLong {
                length,
                max: MAX_DESCRIPTION_LENGTH,
            }),
        }
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated title and description pair.
///
/// Single validation entry point for task text, shared by creation and by
/// the merged candidate built during an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContent {
    title: TaskTitle,
    description: TaskDescription,
}

impl TaskContent {
    /// Validates both text fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskDomainError`] raised by the title or the
    /// description.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: TaskTitle::new(title)?,
            description: TaskDescription::new(description)?,
        })
    }

    /// Splits the content into its validated parts.
    #[must_use]
    pub fn into_parts(self) -> (TaskTitle, TaskDescription) {
        (self.title, self.description)
    }
}

/// Validated task that has not been stored yet.
///
/// The store assigns the identifier and `created_at`, and starts every task
/// in [`TaskStatus::Todo`] with no `closed_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    project_id: ProjectId,
    title: TaskTitle,
    description: TaskDescription,
    deadline: Option<Deadline>,
}

impl NewTask {
    /// Creates a new task draft for a project.
    #[must_use]
    pub fn new(project_id: ProjectId, content: TaskContent) -> Self {
        let (title, description) = content.into_parts();
        Self {
            project_id,
            title,
            description,
            deadline: None,
        }
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }
}

/// Partial update applied to a stored task.
///
/// `None` leaves the stored value untouched. For `deadline`, `Some(None)`
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title, if any.
    pub title: Option<TaskTitle>,
    /// Replacement description, if any.
    pub description: Option<TaskDescription>,
    /// Replacement status, if any.
    pub status: Option<TaskStatus>,
    /// Replacement deadline, if any.
    pub deadline: Option<Option<Deadline>>,
}

impl TaskChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.deadline.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    deadline: Option<Deadline>,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted deadline, if any.
    pub deadline: Option<Deadline>,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Auto-close timestamp, if the task was closed as overdue.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            deadline: data.deadline,
            created_at: data.created_at,
            closed_at: data.closed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the auto-close timestamp, if any.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns `true` when the overdue rule selects this task at `now`:
    /// not done, deadline strictly before `now`, never auto-closed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done
            && self.closed_at.is_none()
            && self.deadline.is_some_and(|deadline| deadline.is_before(now))
    }

    /// Marks the task done and stamps `closed_at`.
    ///
    /// Returns `false` without touching the task when it is not overdue at
    /// `now`, so repeated calls close a task at most once.
    pub fn close_if_overdue(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_overdue(now) {
            return false;
        }
        self.status = TaskStatus::Done;
        self.closed_at = Some(now);
        true
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, changes: &TaskChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(deadline) = changes.deadline {
            self.deadline = deadline;
        }
    }
}
