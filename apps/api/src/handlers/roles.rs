use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{
    CreateRoleRequest, EffectivePermissionsResponse, GenericMessageResponse,
    RoleHierarchyResponse, RoleListResponse, RoleMutationResponse, RoleResponse,
    UpdateRoleRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleMutationResponse>)> {
    let role = state.role_service.create_role(payload.into_role()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(RoleMutationResponse {
            message: "Role created successfully".to_owned(),
            data: RoleResponse::from(role),
        }),
    ))
}

pub async fn list_roles_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<RoleListResponse>> {
    let data = state
        .role_service
        .list_roles()
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(RoleListResponse { data }))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Path(role_name): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state.role_service.get_role(role_name.as_str()).await?;
    Ok(Json(RoleResponse::from(role)))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Path(role_name): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleMutationResponse>> {
    let role = state
        .role_service
        .update_role(role_name.as_str(), payload.into_input()?)
        .await?;

    Ok(Json(RoleMutationResponse {
        message: "Role updated successfully".to_owned(),
        data: RoleResponse::from(role),
    }))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Path(role_name): Path<String>,
) -> ApiResult<Json<GenericMessageResponse>> {
    state.role_service.delete_role(role_name.as_str()).await?;
    Ok(Json(GenericMessageResponse::new("Role deleted successfully")))
}

pub async fn role_hierarchy_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<RoleHierarchyResponse>> {
    let data = state.role_service.role_hierarchy().await?;
    Ok(Json(RoleHierarchyResponse { data }))
}

pub async fn role_permissions_handler(
    State(state): State<AppState>,
    Path(role_name): Path<String>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let permissions = state
        .role_service
        .effective_permissions(role_name.as_str())
        .await?;

    Ok(Json(EffectivePermissionsResponse::from(permissions)))
}
