//! Ticket handlers

use axum::{extract::State, http::StatusCode, Json};
use desk_core::query::Page;
use desk_core::{AnnotatedTicket, NewTicket, TicketQueryParams, TicketSort, TicketStats, TicketStatus};
use desk_shared::Pagination;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, TenantId};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query string of `GET /api/v1/tickets`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to_id: Option<String>,
    pub created_by_id: Option<String>,
    pub team_id: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListTicketsQuery {
    fn into_parts(self) -> (TicketQueryParams, TicketSort, Pagination) {
        let sort = TicketSort::parse(self.sort_by.as_deref(), self.sort_order.as_deref());
        let pagination = Pagination::new(self.page, self.per_page);
        let params = TicketQueryParams {
            status: self.status,
            priority: self.priority,
            assigned_to_id: self.assigned_to_id,
            created_by_id: self.created_by_id,
            team_id: self.team_id,
            country: self.country,
            category: self.category,
            start_date: self.start_date,
            end_date: self.end_date,
            search: self.search,
        };
        (params, sort, pagination)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: TicketStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTicketRequest {
    pub assigned_to_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RateTicketRequest {
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    pub score: i32,
}

pub async fn list_tickets(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    ApiQuery(query): ApiQuery<ListTicketsQuery>,
) -> Result<Json<ApiResponse<Page<AnnotatedTicket>>>, ApiError> {
    let (params, sort, pagination) = query.into_parts();
    let page = state
        .ticket_service
        .list_tickets(&tenant_id, &params, &sort, pagination)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

pub async fn ticket_stats(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    ApiQuery(params): ApiQuery<TicketQueryParams>,
) -> Result<Json<ApiResponse<TicketStats>>, ApiError> {
    let stats = state.ticket_service.ticket_stats(&tenant_id, &params).await?;
    Ok(Json(ApiResponse::success(stats)))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<AnnotatedTicket>>, ApiError> {
    let ticket = state.ticket_service.get_ticket(&tenant_id, &id).await?;
    Ok(Json(ApiResponse::success(ticket)))
}

pub async fn create_ticket(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    ApiJson(payload): ApiJson<NewTicket>,
) -> Result<(StatusCode, Json<ApiResponse<AnnotatedTicket>>), ApiError> {
    info!(tenant_id = %tenant_id, "Create ticket request");

    let ticket = state.ticket_service.create_ticket(&tenant_id, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(ticket))))
}

pub async fn update_status(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<AnnotatedTicket>>, ApiError> {
    let ticket = state
        .ticket_service
        .change_status(&tenant_id, &id, payload.status)
        .await?;
    Ok(Json(ApiResponse::success(ticket)))
}

pub async fn assign_ticket(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<AssignTicketRequest>,
) -> Result<Json<ApiResponse<AnnotatedTicket>>, ApiError> {
    let ticket = state
        .ticket_service
        .assign_ticket(&tenant_id, &id, payload.assigned_to_id)
        .await?;
    Ok(Json(ApiResponse::success(ticket)))
}

pub async fn rate_ticket(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<RateTicketRequest>,
) -> Result<Json<ApiResponse<AnnotatedTicket>>, ApiError> {
    payload.validate()?;

    let ticket = state
        .ticket_service
        .rate_ticket(&tenant_id, &id, payload.score)
        .await?;
    Ok(Json(ApiResponse::success(ticket)))
}
