use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::directory::UserDirectory;
use super::filter::TicketFilter;
use super::sort::TicketSort;
use crate::domain::Ticket;
use crate::sla::{compute_sla_status, SlaStatus};

/// A ticket together with its SLA state at one observation instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub sla_status: SlaStatus,
    pub sla_time_remaining: i64,
}

impl AnnotatedTicket {
    pub fn annotate(ticket: Ticket, now: DateTime<Utc>) -> Self {
        let sla = compute_sla_status(&ticket, now);
        Self {
            ticket,
            sla_status: sla.status,
            sla_time_remaining: sla.remaining_minutes,
        }
    }
}

/// Tickets satisfying every criterion of `filter`, in input order.
pub fn filter_tickets<'a, D>(
    tickets: &'a [Ticket],
    filter: &'a TicketFilter,
    directory: &'a D,
) -> impl Iterator<Item = &'a Ticket> + 'a
where
    D: UserDirectory + ?Sized,
{
    tickets
        .iter()
        .filter(move |ticket| filter.matches(ticket, directory))
}

/// Filters, annotates and orders `tickets`. The input is left untouched and
/// every SLA value is computed against the same `now`.
pub fn query_tickets<D>(
    tickets: &[Ticket],
    filter: &TicketFilter,
    sort: &TicketSort,
    directory: &D,
    now: DateTime<Utc>,
) -> Vec<AnnotatedTicket>
where
    D: UserDirectory + ?Sized,
{
    let mut annotated: Vec<AnnotatedTicket> = filter_tickets(tickets, filter, directory)
        .map(|ticket| AnnotatedTicket::annotate(ticket.clone(), now))
        .collect();

    annotated.sort_by(|a, b| sort.compare(a, b));
    annotated
}
