use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation errors")]
    Validation,
    #[error("Missing key: '{0}'")]
    MissingKey(&'static str),
    #[error("Invalid value for '{0}': null")]
    NullValue(&'static str),
    #[error("{0}")]
    Rejected(String),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Maps any failure of a create request onto a 400 response.
    pub fn rejected(err: StoreError) -> Self {
        match err {
            StoreError::Validation(_) => ApiError::Validation,
            e => ApiError::Rejected(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(entity) => ApiError::NotFound(entity),
            StoreError::Validation(_) => ApiError::Validation,
            e => ApiError::InternalError(e.to_string()),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let message = self.to_string();
        let (status, body) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::Validation
            | ApiError::MissingKey(_)
            | ApiError::NullValue(_)
            | ApiError::Rejected(_) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": [message] }))
            }
            ApiError::InternalError(_) => {
                tracing::error!(error = %message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorsResponse {
    /// Reasons the request was rejected
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn messages_match_wire_format() {
        assert_eq!(
            ApiError::NotFound("Restaurant").to_string(),
            "Restaurant not found"
        );
        assert_eq!(
            ApiError::MissingKey("price").to_string(),
            "Missing key: 'price'"
        );
        assert_eq!(ApiError::Validation.to_string(), "validation errors");
    }

    #[test]
    fn store_errors_map_to_status() {
        let not_found = ApiError::from(StoreError::NotFound("Pizza")).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid =
            ApiError::from(StoreError::Validation(ValidationError::PriceOutOfRange(0)))
                .into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let failed = ApiError::from(StoreError::Task("cancelled".to_string())).into_response();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rejected_create_is_bad_request() {
        let err = ApiError::rejected(StoreError::Query(diesel::result::Error::NotFound));
        assert!(matches!(err, ApiError::Rejected(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::rejected(StoreError::Validation(ValidationError::PriceOutOfRange(
            40,
        )));
        assert!(matches!(err, ApiError::Validation));
    }
}
