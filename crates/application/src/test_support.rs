//! Repository fakes shared by service tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rolegraph_core::{AppError, AppResult};
use rolegraph_domain::Collection;

use crate::document_ports::{Document, DocumentFilter, DocumentRepository, document_name};

#[derive(Default)]
pub(crate) struct FakeDocumentRepository {
    documents: Mutex<BTreeMap<(Collection, String), Document>>,
}

#[async_trait]
impl DocumentRepository for FakeDocumentRepository {
    async fn find_by_name(
        &self,
        collection: Collection,
        name: &str,
    ) -> AppResult<Option<Document>> {
        Ok(self
            .documents
            .lock()
            .await
            .get(&(collection, name.to_owned()))
            .cloned())
    }

    async fn find_all(
        &self,
        collection: Collection,
        filter: DocumentFilter,
    ) -> AppResult<Vec<Document>> {
        Ok(self
            .documents
            .lock()
            .await
            .iter()
            .filter(|((stored_collection, _), document)| {
                *stored_collection == collection && filter.matches(document)
            })
            .map(|(_, document)| document.clone())
            .collect())
    }

    async fn insert_unique(&self, collection: Collection, document: Document) -> AppResult<()> {
        let name = document_name(&document)?.to_owned();
        let mut documents = self.documents.lock().await;
        if documents.contains_key(&(collection, name.clone())) {
            return Err(AppError::DuplicateName(name));
        }
        documents.insert((collection, name), document);
        Ok(())
    }

    async fn update_by_name(
        &self,
        collection: Collection,
        name: &str,
        fields: Document,
    ) -> AppResult<u64> {
        let mut documents = self.documents.lock().await;
        let Some(document) = documents.get_mut(&(collection, name.to_owned())) else {
            return Ok(0);
        };
        document.extend(fields);
        Ok(1)
    }

    async fn delete_by_name(&self, collection: Collection, name: &str) -> AppResult<u64> {
        Ok(self
            .documents
            .lock()
            .await
            .remove(&(collection, name.to_owned()))
            .map_or(0, |_| 1))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}

pub(crate) struct UnreachableDocumentRepository;

#[async_trait]
impl DocumentRepository for UnreachableDocumentRepository {
    async fn find_by_name(
        &self,
        _collection: Collection,
        _name: &str,
    ) -> AppResult<Option<Document>> {
        Err(AppError::StorageFailure("connection refused".to_owned()))
    }

    async fn find_all(
        &self,
        _collection: Collection,
        _filter: DocumentFilter,
    ) -> AppResult<Vec<Document>> {
        Err(AppError::StorageFailure("connection refused".to_owned()))
    }

    async fn insert_unique(&self, _collection: Collection, _document: Document) -> AppResult<()> {
        Err(AppError::StorageFailure("connection refused".to_owned()))
    }

    async fn update_by_name(
        &self,
        _collection: Collection,
        _name: &str,
        _fields: Document,
    ) -> AppResult<u64> {
        Err(AppError::StorageFailure("connection refused".to_owned()))
    }

    async fn delete_by_name(&self, _collection: Collection, _name: &str) -> AppResult<u64> {
        Err(AppError::StorageFailure("connection refused".to_owned()))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::StorageFailure("connection refused".to_owned()))
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}

/// Reports every name as free but loses each insert to a concurrent writer.
pub(crate) struct RacingInsertDocumentRepository;

#[async_trait]
impl DocumentRepository for RacingInsertDocumentRepository {
    async fn find_by_name(
        &self,
        _collection: Collection,
        _name: &str,
    ) -> AppResult<Option<Document>> {
        Ok(None)
    }

    async fn find_all(
        &self,
        _collection: Collection,
        _filter: DocumentFilter,
    ) -> AppResult<Vec<Document>> {
        Ok(Vec::new())
    }

    async fn insert_unique(&self, _collection: Collection, document: Document) -> AppResult<()> {
        Err(AppError::DuplicateName(document_name(&document)?.to_owned()))
    }

    async fn update_by_name(
        &self,
        _collection: Collection,
        _name: &str,
        _fields: Document,
    ) -> AppResult<u64> {
        Ok(0)
    }

    async fn delete_by_name(&self, _collection: Collection, _name: &str) -> AppResult<u64> {
        Ok(0)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "racing"
    }
}
