//! Error types for project field validation.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// The project name exceeds the storage limit.
    #[error("project name is {length} characters long, limit is {max}")]
    NameTooLong {
        /// Length of the rejected value in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The project description is empty after trimming.
    #[error("project description must not be empty")]
    EmptyDescription,

    /// The project description exceeds the storage limit.
    #[error("project description is {length} characters long, limit is {max}")]
    DescriptionTooLong {
        /// Length of the rejected value in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },
}
