//! Application services and ports.

#![forbid(unsafe_code)]

mod collection_service;
mod document_ports;
mod resource_service;
mod role_service;

#[cfg(test)]
mod test_support;

pub use collection_service::{CollectionService, document_from_value};
pub use document_ports::{Document, DocumentFilter, DocumentRepository, document_name};
pub use resource_service::ResourceService;
pub use role_service::{RoleConstraintValidator, RoleService, UpdateRoleInput};
