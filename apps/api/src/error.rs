use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rolegraph_core::AppError;
use tracing::error;

mod types;

pub use types::ErrorResponse;

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_)
            | AppError::UnknownParent(_)
            | AppError::UnknownExclusiveRole(_)
            | AppError::InvalidCollection(_)
            | AppError::CyclicHierarchy(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::RoleNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateName(_) | AppError::HasChildren(_) => StatusCode::CONFLICT,
            AppError::StorageFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self.0, status = status.as_u16(), "request failed");
        }

        let payload = Json(ErrorResponse::new(self.0.to_string()));

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use rolegraph_core::AppError;

    use super::{ApiError, ErrorResponse};

    #[test]
    fn error_kinds_map_to_status_codes() {
        let cases = [
            (AppError::Validation("bad".to_owned()), StatusCode::BAD_REQUEST),
            (AppError::UnknownParent("Ghost".to_owned()), StatusCode::BAD_REQUEST),
            (
                AppError::UnknownExclusiveRole("Ghost".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::InvalidCollection("users".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::CyclicHierarchy("Admin".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::NotFound("x".to_owned()), StatusCode::NOT_FOUND),
            (AppError::RoleNotFound("x".to_owned()), StatusCode::NOT_FOUND),
            (AppError::DuplicateName("x".to_owned()), StatusCode::CONFLICT),
            (AppError::HasChildren("Admin".to_owned()), StatusCode::CONFLICT),
            (
                AppError::StorageFailure("down".to_owned()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal("boom".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), expected);
        }
    }

    #[test]
    fn error_body_carries_rendered_message() {
        let error = AppError::UnknownParent("Ghost".to_owned());

        let body = serde_json::to_value(ErrorResponse::new(error.to_string()));

        assert_eq!(
            body.ok(),
            Some(serde_json::json!({"message": error.to_string()}))
        );
    }
}
