use rolegraph_application::Document;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Optional name filter for generic document listing.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/document-query.ts"
)]
pub struct DocumentQuery {
    pub name: Option<String>,
}

/// Raw documents wrapped in a `data` envelope.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/document-list-response.ts"
)]
pub struct DocumentListResponse {
    #[ts(type = "Array<Record<string, unknown>>")]
    pub data: Vec<Document>,
}

/// Result of a generic document insert.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/document-mutation-response.ts"
)]
pub struct DocumentMutationResponse {
    pub message: String,
    #[ts(type = "Record<string, unknown>")]
    pub data: Document,
}
