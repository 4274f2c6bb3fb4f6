//! # Desk Core - Domain Module
//! 
//! Domain entities for the service desk.

pub mod ticket;
pub mod user;

pub use ticket::{NewTicket, Ticket, TicketPriority, TicketStatus};
pub use user::DirectoryUser;
