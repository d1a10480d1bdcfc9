//! Person domain model.
//!
//! # Responsibility
//! - Define the record managed by the store (id, full name, email).
//! - Provide shape validation helpers.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one and never changes afterwards.
//! - `full_name` and `email` are non-blank after trim for persisted records.
//! - `email` comparison is exact and case-sensitive.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned record identifier.
///
/// Allocated monotonically; never reused within one database.
pub type PersonId = i64;

/// Shape validation failures for person records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    /// `full_name` is empty or whitespace only.
    BlankFullName,
    /// `email` is empty or whitespace only.
    BlankEmail,
    /// `id` is set but not a positive integer.
    InvalidId(PersonId),
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankFullName => write!(f, "full name is required"),
            Self::BlankEmail => write!(f, "email is required"),
            Self::InvalidId(id) => write!(f, "id must be a positive integer, got {id}"),
        }
    }
}

impl Error for PersonValidationError {}

/// Person record as exchanged with callers and persisted by the store.
///
/// Missing fields deserialize to empty strings, so an absent field and a
/// blank one fail validation the same way.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// `None` for a transient record.
    #[serde(default)]
    pub id: Option<PersonId>,
    #[serde(default)]
    pub full_name: String,
    /// Unique across all persisted records.
    #[serde(default)]
    pub email: String,
}

impl Person {
    /// Creates a transient record with no id.
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// Creates a record bound to an existing id, typically for full-replace updates.
    pub fn with_id(id: PersonId, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// Returns whether the store has not assigned an id yet.
    pub fn is_transient(&self) -> bool {
        self.id.is_none()
    }

    /// Checks required fields and id shape.
    ///
    /// # Errors
    /// - `BlankFullName` / `BlankEmail` when a field is blank after trim.
    /// - `InvalidId` when `id` is set to zero or a negative value.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if let Some(id) = self.id {
            validate_id(id)?;
        }
        if self.full_name.trim().is_empty() {
            return Err(PersonValidationError::BlankFullName);
        }
        if self.email.trim().is_empty() {
            return Err(PersonValidationError::BlankEmail);
        }
        Ok(())
    }
}

/// Rejects ids the store can never have allocated.
pub fn validate_id(id: PersonId) -> Result<(), PersonValidationError> {
    if id <= 0 {
        return Err(PersonValidationError::InvalidId(id));
    }
    Ok(())
}
