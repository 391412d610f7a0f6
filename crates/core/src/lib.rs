//! Shared primitives for all Rust crates in Rolegraph.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across Rolegraph crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A record with the same name already exists in the collection.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// The declared parent role does not exist.
    #[error("parent role '{0}' does not exist")]
    UnknownParent(String),

    /// A mutually exclusive role does not exist.
    #[error("mutually exclusive role '{0}' does not exist")]
    UnknownExclusiveRole(String),

    /// The role is still referenced as a parent by other roles.
    #[error("cannot delete role '{0}' with child roles")]
    HasChildren(String),

    /// Requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Permission resolution was requested for a missing role.
    #[error("role '{0}' not found")]
    RoleNotFound(String),

    /// Collection name outside the supported set.
    #[error("invalid collection name '{0}'")]
    InvalidCollection(String),

    /// The parent chain loops back on itself.
    #[error("cyclic role hierarchy detected at role '{0}'")]
    CyclicHierarchy(String),

    /// The storage collaborator is unreachable or returned an error.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
