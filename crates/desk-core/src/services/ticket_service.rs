// ============================================================================
// Desk Core - Ticket Service
// File: crates/desk-core/src/services/ticket_service.rs
// ============================================================================
//! Ticket use cases: query, statistics, and lifecycle mutations

use std::sync::Arc;

use desk_shared::config::SlaSettings;
use desk_shared::utils::mask_email;
use desk_shared::Pagination;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::{NewTicket, Ticket, TicketStatus};
use crate::error::DomainError;
use crate::query::{
    filter_tickets, paginate, query_tickets, AnnotatedTicket, DirectorySnapshot, Page,
    TicketFilter, TicketQueryParams, TicketSort,
};
use crate::repositories::{TicketRepository, UserDirectoryRepository};
use crate::stats::{aggregate_stats, TicketStats};

const MAX_UPDATE_ATTEMPTS: usize = 3;

/// Ticket service. Reads the clock once per call so every SLA value in a
/// result is computed against the same instant.
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    users: Arc<dyn UserDirectoryRepository>,
    clock: Arc<dyn Clock>,
    sla_defaults: SlaSettings,
}

impl TicketService {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        users: Arc<dyn UserDirectoryRepository>,
        clock: Arc<dyn Clock>,
        sla_defaults: SlaSettings,
    ) -> Self {
        Self {
            tickets,
            users,
            clock,
            sla_defaults,
        }
    }

    /// Filtered, SLA-annotated, ordered and paged tickets of a tenant
    pub async fn list_tickets(
        &self,
        tenant_id: &Uuid,
        params: &TicketQueryParams,
        sort: &TicketSort,
        pagination: Pagination,
    ) -> Result<Page<AnnotatedTicket>, DomainError> {
        let now = self.clock.now();
        let filter = TicketFilter::from_params(params);

        let tickets = self.tickets.list_by_tenant(tenant_id).await?;
        let directory = self.directory_for(tenant_id, &filter).await?;
        let matched = query_tickets(&tickets, &filter, sort, &directory, now);

        debug!(
            tenant_id = %tenant_id,
            scanned = tickets.len(),
            matched = matched.len(),
            "Ticket query evaluated"
        );

        Ok(paginate(matched, pagination))
    }

    /// Statistics over the tickets matching `params`
    pub async fn ticket_stats(
        &self,
        tenant_id: &Uuid,
        params: &TicketQueryParams,
    ) -> Result<TicketStats, DomainError> {
        let now = self.clock.now();
        let filter = TicketFilter::from_params(params);

        let tickets = self.tickets.list_by_tenant(tenant_id).await?;
        let directory = self.directory_for(tenant_id, &filter).await?;

        Ok(aggregate_stats(filter_tickets(&tickets, &filter, &directory), now))
    }

    pub async fn get_ticket(&self, tenant_id: &Uuid, id: &Uuid) -> Result<AnnotatedTicket, DomainError> {
        let now = self.clock.now();
        let ticket = self.load(tenant_id, id).await?;
        Ok(AnnotatedTicket::annotate(ticket, now))
    }

    /// Open a new ticket
    pub async fn create_ticket(
        &self,
        tenant_id: &Uuid,
        input: NewTicket,
    ) -> Result<AnnotatedTicket, DomainError> {
        let now = self.clock.now();

        // 1. Referenced users must belong to the tenant
        self.require_user(tenant_id, &input.created_by_id).await?;
        if let Some(assignee) = input.assigned_to_id {
            self.require_user(tenant_id, &assignee).await?;
        }

        // 2. Build and validate the entity
        let ticket = Ticket::new(*tenant_id, input, &self.sla_defaults, now)?;

        // 3. Persist
        let created = self.tickets.create(&ticket).await?;

        let customer = created
            .customer_email
            .as_deref()
            .map(mask_email)
            .unwrap_or_default();
        info!(
            tenant_id = %tenant_id,
            ticket_id = %created.id,
            priority = created.priority.as_str(),
            customer = %customer,
            "Ticket created"
        );

        Ok(AnnotatedTicket::annotate(created, now))
    }

    pub async fn change_status(
        &self,
        tenant_id: &Uuid,
        id: &Uuid,
        status: TicketStatus,
    ) -> Result<AnnotatedTicket, DomainError> {
        let now = self.clock.now();
        let mut previous = status;

        let updated = self
            .modify(tenant_id, id, |ticket| {
                previous = ticket.status;
                ticket.transition_to(status, now)
            })
            .await
            .map_err(|e| {
                if let DomainError::InvalidTransition(reason) = &e {
                    warn!(ticket_id = %id, "Status change rejected: {}", reason);
                }
                e
            })?;

        info!(
            ticket_id = %id,
            from = previous.as_str(),
            to = status.as_str(),
            "Ticket status changed"
        );

        Ok(AnnotatedTicket::annotate(updated, now))
    }

    /// Reassign a ticket. `None` leaves it unassigned.
    pub async fn assign_ticket(
        &self,
        tenant_id: &Uuid,
        id: &Uuid,
        assignee: Option<Uuid>,
    ) -> Result<AnnotatedTicket, DomainError> {
        let now = self.clock.now();
        if let Some(user_id) = assignee {
            self.require_user(tenant_id, &user_id).await?;
        }

        let updated = self
            .modify(tenant_id, id, |ticket| {
                ticket.assign_to(assignee, now);
                Ok(())
            })
            .await?;

        info!(ticket_id = %id, assignee = ?assignee, "Ticket reassigned");
        Ok(AnnotatedTicket::annotate(updated, now))
    }

    /// Record the requester's satisfaction score on a resolved ticket
    pub async fn rate_ticket(
        &self,
        tenant_id: &Uuid,
        id: &Uuid,
        score: i32,
    ) -> Result<AnnotatedTicket, DomainError> {
        let now = self.clock.now();

        let updated = self
            .modify(tenant_id, id, |ticket| ticket.rate(score, now))
            .await
            .map_err(|e| {
                warn!(ticket_id = %id, "Rating rejected: {}", e);
                e
            })?;

        info!(ticket_id = %id, score, "Ticket rated");
        Ok(AnnotatedTicket::annotate(updated, now))
    }

    /// Load, change and write back a ticket. The write only lands if the
    /// stored record is still the one that was loaded; otherwise the ticket
    /// is reloaded and `apply` runs again on the fresh copy.
    async fn modify<F>(&self, tenant_id: &Uuid, id: &Uuid, mut apply: F) -> Result<Ticket, DomainError>
    where
        F: FnMut(&mut Ticket) -> Result<(), DomainError> + Send,
    {
        let mut attempt = 1;
        loop {
            let current = self.load(tenant_id, id).await?;
            let mut next = current.clone();
            apply(&mut next)?;

            match self.tickets.update(&current, &next).await {
                Err(DomainError::Conflict(_)) if attempt < MAX_UPDATE_ATTEMPTS => {
                    debug!(ticket_id = %id, attempt, "Ticket changed concurrently, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn load(&self, tenant_id: &Uuid, id: &Uuid) -> Result<Ticket, DomainError> {
        self.tickets
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(DomainError::TicketNotFound(*id))
    }

    async fn require_user(&self, tenant_id: &Uuid, user_id: &Uuid) -> Result<(), DomainError> {
        match self.users.find_by_id(tenant_id, user_id).await? {
            Some(_) => Ok(()),
            None => {
                warn!(tenant_id = %tenant_id, user_id = %user_id, "Unknown user referenced");
                Err(DomainError::UserNotFound(*user_id))
            }
        }
    }

    /// The directory is only loaded when a criterion needs it.
    async fn directory_for(
        &self,
        tenant_id: &Uuid,
        filter: &TicketFilter,
    ) -> Result<DirectorySnapshot, DomainError> {
        if !filter.needs_directory() {
            return Ok(DirectorySnapshot::default());
        }
        Ok(DirectorySnapshot::new(self.users.list_by_tenant(tenant_id).await?))
    }
}
