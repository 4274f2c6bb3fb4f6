use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, tickets};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/v1/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route("/api/v1/tickets/stats", get(tickets::ticket_stats))
        .route("/api/v1/tickets/{id}", get(tickets::get_ticket))
        .route("/api/v1/tickets/{id}/status", put(tickets::update_status))
        .route("/api/v1/tickets/{id}/assignee", put(tickets::assign_ticket))
        .route("/api/v1/tickets/{id}/satisfaction", put(tickets::rate_ticket))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
