use std::sync::Arc;

use rolegraph_core::{AppError, AppResult};
use rolegraph_domain::Collection;
use serde_json::Value;
use tracing::info;

use crate::document_ports::{Document, DocumentFilter, DocumentRepository, document_name};

/// Unvalidated document access over the named collections.
///
/// Writes through this service skip role hierarchy and exclusion checks. The
/// only guarantees are a known collection name and unique document names.
#[derive(Clone)]
pub struct CollectionService {
    repository: Arc<dyn DocumentRepository>,
}

impl CollectionService {
    /// Creates a new service from a document repository.
    #[must_use]
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// Inserts a raw document into a collection.
    pub async fn add_document(&self, collection: &str, document: Document) -> AppResult<Document> {
        let collection = Collection::from_transport(collection)?;
        let name = document_name(&document)?.to_owned();

        self.repository
            .insert_unique(collection, document.clone())
            .await
            .map_err(|error| match error {
                AppError::DuplicateName(_) => AppError::DuplicateName(format!(
                    "item with name '{name}' already exists in {collection}"
                )),
                other => other,
            })?;

        info!(%collection, document = name, "document added");
        Ok(document)
    }

    /// Lists documents of a collection, optionally narrowed to one name.
    pub async fn list_documents(
        &self,
        collection: &str,
        name: Option<&str>,
    ) -> AppResult<Vec<Document>> {
        let collection = Collection::from_transport(collection)?;
        let filter = match name {
            Some(name) => DocumentFilter::Name(name.to_owned()),
            None => DocumentFilter::All,
        };

        self.repository.find_all(collection, filter).await
    }

    /// Merges top-level fields into a named document.
    pub async fn update_document(
        &self,
        collection: &str,
        name: &str,
        fields: Document,
    ) -> AppResult<()> {
        let collection = Collection::from_transport(collection)?;
        if fields.is_empty() {
            return Err(AppError::Validation(
                "update must set at least one field".to_owned(),
            ));
        }
        if fields
            .get("name")
            .is_some_and(|value| value.as_str().is_none_or(|renamed| renamed.trim().is_empty()))
        {
            return Err(AppError::Validation(
                "document 'name' must be a non-empty string".to_owned(),
            ));
        }

        let matched = self
            .repository
            .update_by_name(collection, name, fields)
            .await?;
        if matched == 0 {
            return Err(AppError::NotFound(format!(
                "{collection} document '{name}' was not found"
            )));
        }

        info!(%collection, document = name, "document updated");
        Ok(())
    }

    /// Deletes a named document.
    pub async fn delete_document(&self, collection: &str, name: &str) -> AppResult<()> {
        let collection = Collection::from_transport(collection)?;
        let deleted = self.repository.delete_by_name(collection, name).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "{collection} document '{name}' was not found"
            )));
        }

        info!(%collection, document = name, "document deleted");
        Ok(())
    }
}

/// Builds a document from a JSON value, rejecting non-object payloads.
pub fn document_from_value(value: Value) -> AppResult<Document> {
    match value {
        Value::Object(document) => Ok(document),
        other => Err(AppError::Validation(format!(
            "document must be a JSON object, got '{other}'"
        ))),
    }
}
