//! In-memory adapters. Each lookup hands out cloned snapshots, so callers
//! always work on a consistent materialized collection.

pub mod directory_repo_impl;
pub mod ticket_repo_impl;

pub use directory_repo_impl::InMemoryUserDirectory;
pub use ticket_repo_impl::InMemoryTicketRepository;
