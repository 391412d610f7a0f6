use std::sync::Arc;

use rolegraph_core::{AppError, AppResult};
use rolegraph_domain::{Collection, Resource, ResourceStatus};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::document_ports::{
    Document, DocumentFilter, DocumentRepository, decode_document, encode_document,
};

// Listing reads only the name strictly. Any status other than "available"
// counts as unavailable and a non-string description is dropped.
#[derive(Debug, Deserialize)]
struct ResourceListingDocument {
    name: String,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
}

impl ResourceListingDocument {
    fn into_resource(self) -> AppResult<Resource> {
        let status = match self.status {
            None | Some(Value::Null) => ResourceStatus::Available,
            Some(Value::String(status)) if status == ResourceStatus::Available.as_str() => {
                ResourceStatus::Available
            }
            Some(_) => ResourceStatus::Unavailable,
        };
        let description = match self.description {
            Some(Value::String(description)) => Some(description),
            _ => None,
        };

        Resource::new(self.name, status, description).map_err(|error| {
            AppError::Internal(format!("stored resources document is malformed: {error}"))
        })
    }
}

/// Application service for the resource registry.
#[derive(Clone)]
pub struct ResourceService {
    repository: Arc<dyn DocumentRepository>,
}

impl ResourceService {
    /// Creates a new service from a document repository.
    #[must_use]
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// Registers a resource under a unique name.
    pub async fn create_resource(&self, resource: Resource) -> AppResult<Resource> {
        let name = resource.name().as_str();
        if self
            .repository
            .find_by_name(Collection::Resources, name)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateName(format!(
                "resource '{name}' already exists"
            )));
        }

        self.repository
            .insert_unique(Collection::Resources, encode_document(&resource)?)
            .await?;

        info!(resource = name, status = resource.status().as_str(), "resource created");
        Ok(resource)
    }

    /// Lists registered resources ordered by name.
    pub async fn list_resources(&self) -> AppResult<Vec<Resource>> {
        self.repository
            .find_all(Collection::Resources, DocumentFilter::All)
            .await?
            .into_iter()
            .map(|document| {
                decode_document::<ResourceListingDocument>(Collection::Resources, document)?
                    .into_resource()
            })
            .collect()
    }

    /// Returns one resource by name.
    pub async fn get_resource(&self, name: &str) -> AppResult<Resource> {
        let document = self
            .repository
            .find_by_name(Collection::Resources, name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("resource '{name}' was not found")))?;

        decode_document(Collection::Resources, document)
    }

    /// Flips a resource between available and unavailable.
    pub async fn toggle_resource_status(&self, name: &str) -> AppResult<Resource> {
        let resource = self.get_resource(name).await?;
        let status = resource.status().toggled();

        let mut fields = Document::new();
        fields.insert(
            "status".to_owned(),
            Value::String(status.as_str().to_owned()),
        );
        let matched = self
            .repository
            .update_by_name(Collection::Resources, name, fields)
            .await?;
        if matched == 0 {
            return Err(AppError::NotFound(format!("resource '{name}' was not found")));
        }

        info!(resource = name, status = status.as_str(), "resource status toggled");
        Resource::new(name, status, resource.description().map(str::to_owned))
    }

    /// Removes a resource.
    pub async fn delete_resource(&self, name: &str) -> AppResult<()> {
        let deleted = self
            .repository
            .delete_by_name(Collection::Resources, name)
            .await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("resource '{name}' was not found")));
        }

        info!(resource = name, "resource deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
