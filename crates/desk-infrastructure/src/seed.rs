//! JSON seed data for the in-memory stores

use std::path::Path;

use desk_core::domain::{DirectoryUser, Ticket};
use desk_shared::AppError;
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::memory::{InMemoryTicketRepository, InMemoryUserDirectory};

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<DirectoryUser>,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let data = Self::from_json(&raw)?;
        info!(
            "Seed data loaded from {}: {} users, {} tickets",
            path.display(),
            data.users.len(),
            data.tickets.len()
        );
        Ok(data)
    }

    /// Builds the stores, skipping records that fail validation.
    pub fn into_stores(self) -> (InMemoryTicketRepository, InMemoryUserDirectory) {
        let users = self.users.into_iter().filter(|user| match user.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping invalid seed user {}: {}", user.id, e);
                false
            }
        });
        let directory = InMemoryUserDirectory::with_users(users.collect::<Vec<_>>());

        let tickets = self.tickets.into_iter().filter(|ticket| match ticket.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping invalid seed ticket {}: {}", ticket.id, e);
                false
            }
        });
        let repository = InMemoryTicketRepository::with_tickets(tickets.collect::<Vec<_>>());

        (repository, directory)
    }
}
