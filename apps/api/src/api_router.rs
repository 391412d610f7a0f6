use axum::Router;
use axum::routing::{get, post, put};
use rolegraph_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

use cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let role_routes = Router::new()
        .route(
            "/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/roles/hierarchy",
            get(handlers::roles::role_hierarchy_handler),
        )
        .route(
            "/roles/{role_name}",
            get(handlers::roles::get_role_handler)
                .put(handlers::roles::update_role_handler)
                .delete(handlers::roles::delete_role_handler),
        )
        .route(
            "/roles/{role_name}/permissions",
            get(handlers::roles::role_permissions_handler),
        );

    let resource_routes = Router::new()
        .route(
            "/resources",
            get(handlers::resources::list_resources_handler)
                .post(handlers::resources::create_resource_handler),
        )
        .route(
            "/resources/{resource_name}",
            get(handlers::resources::get_resource_handler)
                .delete(handlers::resources::delete_resource_handler),
        )
        .route(
            "/resources/{resource_name}/toggle-status",
            put(handlers::resources::toggle_resource_status_handler),
        );

    let collection_routes = Router::new()
        .route(
            "/collections/{collection}",
            post(handlers::collections::add_document_handler)
                .get(handlers::collections::list_documents_handler),
        )
        .route(
            "/collections/{collection}/{name}",
            put(handlers::collections::update_document_handler)
                .delete(handlers::collections::delete_document_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(role_routes)
        .merge(resource_routes)
        .merge(collection_routes)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
