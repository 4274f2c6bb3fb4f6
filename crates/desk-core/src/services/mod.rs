//! Domain services (business logic)

pub mod ticket_service;

pub use ticket_service::TicketService;
