//! Ticket query engine: filtering, SLA annotation, ordering and paging.

pub mod directory;
pub mod engine;
pub mod filter;
pub mod page;
pub mod sort;

pub use directory::{DirectorySnapshot, UserDirectory};
pub use engine::{filter_tickets, query_tickets, AnnotatedTicket};
pub use filter::{Criterion, TicketFilter, TicketQueryParams};
pub use page::{paginate, Page};
pub use sort::{SortField, SortOrder, TicketSort};
