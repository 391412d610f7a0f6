use std::str::FromStr;

use rolegraph_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Availability of a registered resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// Resource can be used.
    #[default]
    Available,
    /// Resource is switched off.
    Unavailable,
}

impl ResourceStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    /// Returns the opposite status.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Available => Self::Unavailable,
            Self::Unavailable => Self::Available,
        }
    }
}

impl FromStr for ResourceStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(AppError::Validation(format!(
                "unknown resource status '{value}'"
            ))),
        }
    }
}

/// A registered resource with a binary availability toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    name: NonEmptyString,
    #[serde(default)]
    status: ResourceStatus,
    #[serde(default)]
    description: Option<String>,
}

impl Resource {
    /// Creates a resource definition.
    pub fn new(
        name: impl Into<String>,
        status: ResourceStatus,
        description: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            status,
            description,
        })
    }

    /// Returns the unique resource name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns current availability.
    #[must_use]
    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
