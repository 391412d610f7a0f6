use std::sync::Arc;

use rolegraph_application::{CollectionService, DocumentRepository, ResourceService, RoleService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role_service: RoleService,
    pub resource_service: ResourceService,
    pub collection_service: CollectionService,
    pub document_repository: Arc<dyn DocumentRepository>,
}
