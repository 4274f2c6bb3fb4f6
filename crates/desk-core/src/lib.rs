//! # Desk Core
//! 
//! Ticket domain, SLA calculator, query engine, statistics, repository
//! ports, and services for the service desk.

pub mod clock;
pub mod domain;
pub mod error;
pub mod query;
pub mod repositories;
pub mod services;
pub mod sla;
pub mod stats;

#[cfg(test)]
mod fixtures;

// Re-export domain entities
pub use domain::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DomainError;
pub use query::{query_tickets, AnnotatedTicket, TicketFilter, TicketQueryParams, TicketSort};
pub use sla::{compute_sla_status, SlaSnapshot, SlaStatus};
pub use stats::{aggregate_stats, TicketStats};
