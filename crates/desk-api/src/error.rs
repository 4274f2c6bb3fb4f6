use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use desk_core::DomainError;
use thiserror::Error;

use crate::response::{ApiResponse, ErrorCode};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::TicketNotFound(_) | DomainError::UserNotFound(_) => {
                ApiError::NotFound(error.to_string())
            }
            DomainError::ValidationError(msg) => ApiError::BadRequest(msg),
            DomainError::InvalidTransition(msg) => ApiError::Conflict(msg),
            DomainError::Conflict(_) => ApiError::Conflict(error.to_string()),
            DomainError::StoreError(msg) | DomainError::InternalError(msg) => {
                ApiError::InternalError(msg)
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorCode::Conflict, msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, msg)
            }
        };

        (status, Json(ApiResponse::failure(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::TicketNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (DomainError::UserNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (DomainError::ValidationError("title".into()), StatusCode::BAD_REQUEST),
            (DomainError::InvalidTransition("open".into()), StatusCode::CONFLICT),
            (DomainError::Conflict(Uuid::nil()), StatusCode::CONFLICT),
            (DomainError::StoreError("poisoned".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            let response = ApiError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
