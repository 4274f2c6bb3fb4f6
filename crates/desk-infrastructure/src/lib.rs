//! # Desk Infrastructure
//! 
//! Store implementations (adapters) for the repository ports.

pub mod memory;
pub mod seed;

pub use memory::{InMemoryTicketRepository, InMemoryUserDirectory};
pub use seed::SeedData;
