//! Project aggregate and its validated fields.

use super::{ProjectDomainError, ProjectId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum project name length, matching the `VARCHAR(100)` column.
const MAX_NAME_LENGTH: usize = 100;

/// Maximum project description length, matching the `VARCHAR(255)` column.
const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Validated project name.
///
/// The value is stored exactly as supplied. Comparison for uniqueness is
/// case-insensitive and goes through [`ProjectName::matches_ignoring_case`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the value is blank, or
    /// [`ProjectDomainError::NameTooLong`] when it exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ProjectDomainError::EmptyName);
        }
        let length = raw.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ProjectDomainError::NameTooLong {
                length,
                max: MAX_NAME_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `other` names the same project ignoring case.
    #[must_use]
    pub fn matches_ignoring_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated project description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    /// Creates a validated project description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyDescription`] when the value is
    /// blank, or [`ProjectDomainError::DescriptionTooLong`] when it exceeds
    /// 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ProjectDomainError::EmptyDescription);
        }
        let length = raw.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(ProjectDomainError::DescriptionTooLong {
                length,
                max: MAX_DESCRIPTION_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validated field set for a project that has not been stored yet.
///
/// This is the single validation entry point for project fields. Edits run
/// the merged candidate (current values overridden by supplied ones) through
/// [`NewProject::new`] before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: ProjectName,
    description: ProjectDescription,
}

impl NewProject {
    /// Validates both project fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProjectDomainError`] raised by the name or the
    /// description.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ProjectDomainError> {
        Ok(Self {
            name: ProjectName::new(name)?,
            description: ProjectDescription::new(description)?,
        })
    }

    /// Returns the validated name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the validated description.
    #[must_use]
    pub const fn description(&self) -> &ProjectDescription {
        &self.description
    }

    /// Splits the candidate into its validated parts.
    #[must_use]
    pub fn into_parts(self) -> (ProjectName, ProjectDescription) {
        (self.name, self.description)
    }
}

/// Partial update applied to a stored project.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    /// Replacement name, if any.
    pub name: Option<ProjectName>,
    /// Replacement description, if any.
    pub description: Option<ProjectDescription>,
}

impl ProjectChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: ProjectDescription,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Store-assigned identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: ProjectDescription,
}

impl Project {
    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub const fn description(&self) -> &ProjectDescription {
        &self.description
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, changes: &ProjectChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
    }
}
