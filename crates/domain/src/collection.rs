use std::str::FromStr;

use rolegraph_core::AppError;
use serde::{Deserialize, Serialize};

/// Closed set of named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Role documents.
    Roles,
    /// Resource documents.
    Resources,
    /// Opaque change pattern documents.
    ChangePatterns,
}

impl Collection {
    /// Returns a stable storage value for this collection.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roles => "roles",
            Self::Resources => "resources",
            Self::ChangePatterns => "change_patterns",
        }
    }

    /// Returns all known collections.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Collection] = &[
            Collection::Roles,
            Collection::Resources,
            Collection::ChangePatterns,
        ];

        ALL
    }

    /// Parses a transport value into a collection.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "roles" => Ok(Self::Roles),
            "resources" => Ok(Self::Resources),
            "change_patterns" => Ok(Self::ChangePatterns),
            _ => Err(AppError::InvalidCollection(value.to_owned())),
        }
    }
}
