// ============================================================================
// Desk Infrastructure - In-Memory Ticket Repository
// File: crates/desk-infrastructure/src/memory/ticket_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};
use uuid::Uuid;

use desk_core::domain::Ticket;
use desk_core::error::DomainError;
use desk_core::repositories::TicketRepository;

#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: RwLock<HashMap<Uuid, Ticket>>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tickets(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        Self {
            tickets: RwLock::new(tickets.into_iter().map(|t| (t.id, t)).collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.tickets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tickets.read().await.is_empty()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn find_by_id(&self, tenant_id: &Uuid, id: &Uuid) -> Result<Option<Ticket>, DomainError> {
        let tickets = self.tickets.read().await;
        Ok(tickets
            .get(id)
            .filter(|t| t.tenant_id == *tenant_id)
            .cloned())
    }

    async fn list_by_tenant(&self, tenant_id: &Uuid) -> Result<Vec<Ticket>, DomainError> {
        let tickets = self.tickets.read().await;
        Ok(tickets
            .values()
            .filter(|t| t.tenant_id == *tenant_id)
            .cloned()
            .collect())
    }

    async fn create(&self, ticket: &Ticket) -> Result<Ticket, DomainError> {
        let mut tickets = self.tickets.write().await;
        if tickets.contains_key(&ticket.id) {
            error!("Duplicate ticket id: {}", ticket.id);
            return Err(DomainError::StoreError(format!(
                "ticket {} already exists",
                ticket.id
            )));
        }

        tickets.insert(ticket.id, ticket.clone());
        debug!("Ticket stored: {}", ticket.id);
        Ok(ticket.clone())
    }

    async fn update(&self, expected: &Ticket, ticket: &Ticket) -> Result<Ticket, DomainError> {
        let mut tickets = self.tickets.write().await;
        match tickets.get_mut(&ticket.id) {
            Some(existing) if existing.tenant_id == ticket.tenant_id => {
                if existing != expected {
                    warn!("Stale write rejected for ticket {}", ticket.id);
                    return Err(DomainError::Conflict(ticket.id));
                }
                *existing = ticket.clone();
                debug!("Ticket updated: {}", ticket.id);
                Ok(ticket.clone())
            }
            _ => Err(DomainError::TicketNotFound(ticket.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use desk_core::domain::{NewTicket, TicketStatus};
    use desk_shared::config::SlaSettings;

    fn ticket(tenant_id: Uuid, title: &str) -> Ticket {
        let input = NewTicket {
            title: title.to_string(),
            created_by_id: Uuid::new_v4(),
            ..Default::default()
        };
        Ticket::new(tenant_id, input, &SlaSettings::default(), Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_tenant_isolation() {
        let tenant_a = Uuid::new_v4();
        let tenant_b = Uuid::new_v4();
        let repo = InMemoryTicketRepository::with_tickets(vec![
            ticket(tenant_a, "a1"),
            ticket(tenant_a, "a2"),
            ticket(tenant_b, "b1"),
        ]);

        assert_eq!(repo.list_by_tenant(&tenant_a).await.unwrap().len(), 2);
        assert_eq!(repo.list_by_tenant(&tenant_b).await.unwrap().len(), 1);

        let b1 = repo.list_by_tenant(&tenant_b).await.unwrap().remove(0);
        assert!(repo.find_by_id(&tenant_a, &b1.id).await.unwrap().is_none());
        assert!(repo.find_by_id(&tenant_b, &b1.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let repo = InMemoryTicketRepository::new();
        let t = ticket(Uuid::new_v4(), "printer");

        repo.create(&t).await.unwrap();
        assert!(matches!(repo.create(&t).await, Err(DomainError::StoreError(_))));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_requires_existing_ticket() {
        let repo = InMemoryTicketRepository::new();
        let mut t = ticket(Uuid::new_v4(), "printer");

        assert!(matches!(repo.update(&t, &t).await, Err(DomainError::TicketNotFound(_))));

        repo.create(&t).await.unwrap();
        let loaded = t.clone();
        t.title = "printer on fire".to_string();
        repo.update(&loaded, &t).await.unwrap();

        let stored = repo.find_by_id(&t.tenant_id, &t.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "printer on fire");
    }

    #[tokio::test]
    async fn test_stale_update_is_rejected() {
        let repo = InMemoryTicketRepository::new();
        let original = ticket(Uuid::new_v4(), "printer");
        repo.create(&original).await.unwrap();

        // two writers load the same version
        let mut assigned = original.clone();
        assigned.assign_to(Some(Uuid::new_v4()), Utc::now());
        let mut resolved = original.clone();
        resolved.transition_to(TicketStatus::Resolved, Utc::now()).unwrap();

        repo.update(&original, &assigned).await.unwrap();
        let result = repo.update(&original, &resolved).await;
        assert!(matches!(result, Err(DomainError::Conflict(id)) if id == original.id));

        let stored = repo.find_by_id(&original.tenant_id, &original.id).await.unwrap().unwrap();
        assert_eq!(stored, assigned);
    }
}
