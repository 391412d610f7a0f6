use std::sync::Arc;

use rolegraph_core::AppError;
use rolegraph_domain::{Collection, Resource, ResourceStatus};
use serde_json::Value;

use crate::document_ports::DocumentRepository;
use crate::test_support::FakeDocumentRepository;

use super::ResourceService;

fn service_with_repository() -> (ResourceService, Arc<FakeDocumentRepository>) {
    let repository = Arc::new(FakeDocumentRepository::default());
    (ResourceService::new(repository.clone()), repository)
}

fn service() -> ResourceService {
    ResourceService::new(Arc::new(FakeDocumentRepository::default()))
}

fn server(name: &str) -> Resource {
    Resource::new(
        name,
        ResourceStatus::Available,
        Some("Main resource for testing".to_owned()),
    )
    .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn toggling_twice_restores_original_status() {
    let service = service();
    assert!(service.create_resource(server("Server1")).await.is_ok());

    let first = service.toggle_resource_status("Server1").await;
    let second = service.toggle_resource_status("Server1").await;

    assert_eq!(
        first.map(|resource| resource.status()).ok(),
        Some(ResourceStatus::Unavailable)
    );
    assert_eq!(
        second.map(|resource| resource.status()).ok(),
        Some(ResourceStatus::Available)
    );
    let stored = service.get_resource("Server1").await;
    assert_eq!(
        stored.ok().and_then(|resource| resource.description().map(str::to_owned)),
        Some("Main resource for testing".to_owned())
    );
}

#[tokio::test]
async fn toggling_unknown_resource_is_not_found() {
    let service = service();

    let result = service.toggle_resource_status("Ghost").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn duplicate_resource_is_rejected() {
    let service = service();
    assert!(service.create_resource(server("Server1")).await.is_ok());

    let result = service.create_resource(server("Server1")).await;

    assert!(matches!(result, Err(AppError::DuplicateName(_))));
    assert_eq!(service.list_resources().await.map(|list| list.len()).ok(), Some(1));
}

#[tokio::test]
async fn delete_resource_removes_it_once() {
    let service = service();
    assert!(service.create_resource(server("Server1")).await.is_ok());

    assert!(service.delete_resource("Server1").await.is_ok());
    let second = service.delete_resource("Server1").await;

    assert!(matches!(second, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn listing_tolerates_generically_written_resources() {
    let (service, repository) = service_with_repository();
    assert!(service.create_resource(server("Server1")).await.is_ok());
    let Value::Object(document) =
        serde_json::json!({"name": "Printer", "status": "broken", "description": 7})
    else {
        unreachable!();
    };
    assert!(
        repository
            .insert_unique(Collection::Resources, document)
            .await
            .is_ok()
    );

    let listed = service.list_resources().await;

    let Ok(listed) = listed else {
        panic!("listing should not fail on advisory fields");
    };
    let printer = listed
        .iter()
        .find(|resource| resource.name().as_str() == "Printer");
    assert_eq!(listed.len(), 2);
    assert_eq!(
        printer.map(|resource| (resource.status(), resource.description())),
        Some((ResourceStatus::Unavailable, None))
    );
}
