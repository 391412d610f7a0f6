//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_document_repository;
mod postgres_document_repository;

pub use in_memory_document_repository::InMemoryDocumentRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
