use std::str::FromStr;

use rolegraph_core::AppResult;
use rolegraph_domain::{Resource, ResourceStatus};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for resource registration.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-resource-request.ts"
)]
pub struct CreateResourceRequest {
    pub name: String,
    #[serde(default)]
    #[ts(type = "\"available\" | \"unavailable\" | null")]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateResourceRequest {
    /// Converts the payload into a domain resource.
    pub fn into_resource(self) -> AppResult<Resource> {
        let status = self
            .status
            .as_deref()
            .map(ResourceStatus::from_str)
            .transpose()?
            .unwrap_or_default();

        Resource::new(self.name, status, self.description)
    }
}

/// API representation of a resource.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resource-response.ts"
)]
pub struct ResourceResponse {
    pub name: String,
    #[ts(type = "\"available\" | \"unavailable\"")]
    pub status: String,
    pub description: Option<String>,
}

impl From<Resource> for ResourceResponse {
    fn from(resource: Resource) -> Self {
        Self {
            name: resource.name().as_str().to_owned(),
            status: resource.status().as_str().to_owned(),
            description: resource.description().map(ToOwned::to_owned),
        }
    }
}

/// Resource list wrapped in a `data` envelope.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resource-list-response.ts"
)]
pub struct ResourceListResponse {
    pub data: Vec<ResourceResponse>,
}

/// Result of a resource mutation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resource-mutation-response.ts"
)]
pub struct ResourceMutationResponse {
    pub message: String,
    pub data: ResourceResponse,
}
