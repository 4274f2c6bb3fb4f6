//! # Desk API
//! 
//! HTTP handlers, extractors, response envelope, and router.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
