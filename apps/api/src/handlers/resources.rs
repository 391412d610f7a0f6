use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{
    CreateResourceRequest, GenericMessageResponse, ResourceListResponse,
    ResourceMutationResponse, ResourceResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_resource_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateResourceRequest>,
) -> ApiResult<(StatusCode, Json<ResourceMutationResponse>)> {
    let resource = state
        .resource_service
        .create_resource(payload.into_resource()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ResourceMutationResponse {
            message: "Resource created successfully".to_owned(),
            data: ResourceResponse::from(resource),
        }),
    ))
}

pub async fn list_resources_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<ResourceListResponse>> {
    let data = state
        .resource_service
        .list_resources()
        .await?
        .into_iter()
        .map(ResourceResponse::from)
        .collect();

    Ok(Json(ResourceListResponse { data }))
}

pub async fn get_resource_handler(
    State(state): State<AppState>,
    Path(resource_name): Path<String>,
) -> ApiResult<Json<ResourceResponse>> {
    let resource = state
        .resource_service
        .get_resource(resource_name.as_str())
        .await?;

    Ok(Json(ResourceResponse::from(resource)))
}

pub async fn toggle_resource_status_handler(
    State(state): State<AppState>,
    Path(resource_name): Path<String>,
) -> ApiResult<Json<ResourceMutationResponse>> {
    let resource = state
        .resource_service
        .toggle_resource_status(resource_name.as_str())
        .await?;

    Ok(Json(ResourceMutationResponse {
        message: "Resource status updated successfully".to_owned(),
        data: ResourceResponse::from(resource),
    }))
}

pub async fn delete_resource_handler(
    State(state): State<AppState>,
    Path(resource_name): Path<String>,
) -> ApiResult<Json<GenericMessageResponse>> {
    state
        .resource_service
        .delete_resource(resource_name.as_str())
        .await?;

    Ok(Json(GenericMessageResponse::new(
        "Resource deleted successfully",
    )))
}
