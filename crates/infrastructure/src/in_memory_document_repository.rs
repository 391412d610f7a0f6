use std::collections::BTreeMap;

use async_trait::async_trait;
use rolegraph_application::{Document, DocumentFilter, DocumentRepository, document_name};
use rolegraph_core::{AppError, AppResult};
use rolegraph_domain::Collection;
use serde_json::Value;
use tokio::sync::RwLock;

/// In-memory document store keyed by collection and document name.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<BTreeMap<(Collection, String), Document>>,
}

impl InMemoryDocumentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn find_by_name(
        &self,
        collection: Collection,
        name: &str,
    ) -> AppResult<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&(collection, name.to_owned())).cloned())
    }

    async fn find_all(
        &self,
        collection: Collection,
        filter: DocumentFilter,
    ) -> AppResult<Vec<Document>> {
        let documents = self.documents.read().await;

        Ok(documents
            .range((collection, String::new())..)
            .take_while(|((stored_collection, _), _)| *stored_collection == collection)
            .filter(|(_, document)| filter.matches(document))
            .map(|(_, document)| document.clone())
            .collect())
    }

    async fn insert_unique(&self, collection: Collection, document: Document) -> AppResult<()> {
        let key = (collection, document_name(&document)?.to_owned());
        let mut documents = self.documents.write().await;

        if documents.contains_key(&key) {
            return Err(AppError::DuplicateName(format!(
                "{} document '{}' already exists",
                key.0, key.1
            )));
        }

        documents.insert(key, document);
        Ok(())
    }

    async fn update_by_name(
        &self,
        collection: Collection,
        name: &str,
        fields: Document,
    ) -> AppResult<u64> {
        let key = (collection, name.to_owned());
        let mut documents = self.documents.write().await;

        let Some(mut document) = documents.get(&key).cloned() else {
            return Ok(0);
        };
        document.extend(fields);
        let renamed_key = (collection, document_name(&document)?.to_owned());

        if renamed_key != key {
            if documents.contains_key(&renamed_key) {
                return Err(AppError::DuplicateName(format!(
                    "{} document '{}' already exists",
                    renamed_key.0, renamed_key.1
                )));
            }
            documents.remove(&key);
        }

        documents.insert(renamed_key, document);
        Ok(1)
    }

    async fn delete_by_name(&self, collection: Collection, name: &str) -> AppResult<u64> {
        let mut documents = self.documents.write().await;
        Ok(documents
            .remove(&(collection, name.to_owned()))
            .map_or(0, |_| 1))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
