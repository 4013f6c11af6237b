//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record.
//! - Provide validation used by repository write/read paths.
//!
//! # Invariants
//! - `id == None` means the record has not been persisted yet.
//! - `id`, when set, is strictly positive.
//! - `name` is never blank.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric identifier assigned by the store.
pub type StudentId = i64;

/// Canonical student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Store-assigned identity. `None` until the first save.
    pub id: Option<StudentId>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Validation failures for student records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    NonPositiveId(StudentId),
    BlankName,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId(id) => write!(f, "student id must be positive, got {id}"),
            Self::BlankName => write!(f, "student name cannot be blank"),
        }
    }
}

impl Error for StudentValidationError {}

impl Student {
    /// Creates an unsaved student. The repository assigns the id on save.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: None,
        }
    }

    /// Creates a student with a caller-provided id.
    ///
    /// Saving such a record updates the existing row with that id, or
    /// creates one when none exists.
    pub fn with_id(id: StudentId, name: impl Into<String>) -> Result<Self, StudentValidationError> {
        if id <= 0 {
            return Err(StudentValidationError::NonPositiveId(id));
        }
        Ok(Self {
            id: Some(id),
            name: name.into(),
            email: None,
        })
    }

    /// Builder-style setter for `email`.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns whether this record already carries a store identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Checks record invariants before persistence.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if let Some(id) = self.id {
            if id <= 0 {
                return Err(StudentValidationError::NonPositiveId(id));
            }
        }
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::BlankName);
        }
        Ok(())
    }
}
