use serde::Serialize;
use ts_rs::TS;

/// Body of every failed Rolegraph response, `{"message": "..."}`.
///
/// The message is the rendered [`rolegraph_core::AppError`], so clients can
/// show it as is while branching on the status code.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    /// Human-readable failure reason.
    message: String,
}

impl ErrorResponse {
    pub(super) fn new(message: String) -> Self {
        Self { message }
    }
}
