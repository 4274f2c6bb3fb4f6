//! Ticket repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Ticket;
use crate::error::DomainError;

/// Every lookup is scoped to a tenant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn find_by_id(&self, tenant_id: &Uuid, id: &Uuid) -> Result<Option<Ticket>, DomainError>;
    async fn list_by_tenant(&self, tenant_id: &Uuid) -> Result<Vec<Ticket>, DomainError>;
    async fn create(&self, ticket: &Ticket) -> Result<Ticket, DomainError>;
    /// Replaces the stored ticket only while it still equals `expected`;
    /// `DomainError::Conflict` otherwise.
    async fn update(&self, expected: &Ticket, ticket: &Ticket) -> Result<Ticket, DomainError>;
}
