use std::sync::Arc;

use rolegraph_application::{CollectionService, DocumentRepository, ResourceService, RoleService};
use rolegraph_core::AppError;
use rolegraph_infrastructure::{InMemoryDocumentRepository, PostgresDocumentRepository};

use crate::api_config::StorageBackendConfig;
use crate::state::AppState;

use super::connect_and_migrate;

pub async fn build_document_repository(
    storage: &StorageBackendConfig,
) -> Result<Arc<dyn DocumentRepository>, AppError> {
    match storage {
        StorageBackendConfig::Memory => Ok(Arc::new(InMemoryDocumentRepository::new())),
        StorageBackendConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = connect_and_migrate(database_url, *max_connections).await?;
            Ok(Arc::new(PostgresDocumentRepository::new(pool)))
        }
    }
}

pub fn build_app_state(repository: Arc<dyn DocumentRepository>) -> AppState {
    AppState {
        role_service: RoleService::new(repository.clone()),
        resource_service: ResourceService::new(repository.clone()),
        collection_service: CollectionService::new(repository.clone()),
        document_repository: repository,
    }
}
