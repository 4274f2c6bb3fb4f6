//! Request extractors

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use desk_shared::constants::TENANT_HEADER;
use desk_shared::utils::parse_uuid;
use uuid::Uuid;

use crate::error::ApiError;

/// Tenant taken from the `X-Tenant-Id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantId(pub Uuid);

impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::BadRequest("Missing X-Tenant-Id header".to_string()))?;

        parse_uuid(raw)
            .map(TenantId)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid tenant id: {}", raw)))
    }
}

/// `axum::Json` whose rejection is rendered as an `ApiResponse` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
