//! Repository traits (ports)

pub mod ticket_repository;
pub mod user_directory_repository;

pub use ticket_repository::TicketRepository;
pub use user_directory_repository::UserDirectoryRepository;

#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
#[cfg(test)]
pub use user_directory_repository::MockUserDirectoryRepository;
