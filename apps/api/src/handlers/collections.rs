use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use rolegraph_application::document_from_value;
use serde_json::Value;

use crate::dto::{
    DocumentListResponse, DocumentMutationResponse, DocumentQuery, GenericMessageResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn add_document_handler(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<DocumentMutationResponse>)> {
    let data = state
        .collection_service
        .add_document(collection.as_str(), document_from_value(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentMutationResponse {
            message: "Data added successfully".to_owned(),
            data,
        }),
    ))
}

pub async fn list_documents_handler(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(query): Query<DocumentQuery>,
) -> ApiResult<Json<DocumentListResponse>> {
    let data = state
        .collection_service
        .list_documents(collection.as_str(), query.name.as_deref())
        .await?;

    Ok(Json(DocumentListResponse { data }))
}

pub async fn update_document_handler(
    State(state): State<AppState>,
    Path((collection, name)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<GenericMessageResponse>> {
    state
        .collection_service
        .update_document(
            collection.as_str(),
            name.as_str(),
            document_from_value(payload)?,
        )
        .await?;

    Ok(Json(GenericMessageResponse::new("Data updated successfully")))
}

pub async fn delete_document_handler(
    State(state): State<AppState>,
    Path((collection, name)): Path<(String, String)>,
) -> ApiResult<Json<GenericMessageResponse>> {
    state
        .collection_service
        .delete_document(collection.as_str(), name.as_str())
        .await?;

    Ok(Json(GenericMessageResponse::new("Data deleted successfully")))
}
