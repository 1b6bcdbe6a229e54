//! Error types for task domain validation and parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or validating task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("task title is {length} characters long, limit is {max}")]
    TitleTooLong {
        /// Length of the rejected value in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The task description exceeds the storage limit.
    #[error("task description is {length} characters long, limit is {max}")]
    DescriptionTooLong {
        /// Length of the rejected value in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The status is not one of `todo`, `doing` or `done`.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The deadline falls on a calendar day before today.
    #[error("deadline {deadline} is in the past (today is {today})")]
    DeadlineInPast {
        /// Local calendar date of the rejected deadline.
        deadline: NaiveDate,
        /// Local calendar date at validation time.
        today: NaiveDate,
    },

    /// The deadline text is neither `YYYY-MM-DD` nor RFC 3339, or it names a
    /// local time that does not exist.
    #[error("malformed deadline '{0}', expected YYYY-MM-DD or an RFC 3339 timestamp")]
    MalformedDeadline(String),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status '{0}', expected todo, doing or done")]
pub struct ParseTaskStatusError(pub String);
