use std::sync::Arc;

use desk_core::services::TicketService;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub ticket_service: Arc<TicketService>,
}
