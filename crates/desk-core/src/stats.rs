//! Ticket statistics aggregator

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Ticket, TicketPriority, TicketStatus};
use crate::sla::{compute_sla_status, SlaStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlaHistogram {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub urgent: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
    /// RED and still OPEN or IN_PROGRESS.
    pub overdue: usize,
    /// URGENT and not yet resolved or closed.
    pub critical_open: usize,
    pub sla: SlaHistogram,
    pub by_priority: PriorityBreakdown,
    pub avg_satisfaction: Option<f64>,
    pub avg_resolution_minutes: Option<f64>,
    pub resolution_rate: f64,
    pub sla_compliance: f64,
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn mean(sum: f64, count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Reduces `tickets` into summary counts, evaluating every SLA at `now`.
pub fn aggregate_stats<'a>(
    tickets: impl IntoIterator<Item = &'a Ticket>,
    now: DateTime<Utc>,
) -> TicketStats {
    let mut total = 0;
    let (mut open, mut in_progress, mut resolved, mut closed) = (0, 0, 0, 0);
    let (mut overdue, mut critical_open) = (0, 0);
    let mut sla = SlaHistogram::default();
    let mut by_priority = PriorityBreakdown::default();
    let (mut satisfaction_sum, mut satisfaction_count) = (0.0, 0);
    let (mut resolution_sum, mut resolution_count) = (0.0, 0);

    for ticket in tickets {
        total += 1;

        match ticket.status {
            TicketStatus::Open => open += 1,
            TicketStatus::InProgress => in_progress += 1,
            TicketStatus::Resolved => resolved += 1,
            TicketStatus::Closed => closed += 1,
        }

        match ticket.priority {
            TicketPriority::Low => by_priority.low += 1,
            TicketPriority::Medium => by_priority.medium += 1,
            TicketPriority::High => by_priority.high += 1,
            TicketPriority::Urgent => by_priority.urgent += 1,
        }

        let snapshot = compute_sla_status(ticket, now);
        match snapshot.status {
            SlaStatus::Green => sla.green += 1,
            SlaStatus::Yellow => sla.yellow += 1,
            SlaStatus::Red => sla.red += 1,
        }

        if snapshot.status.is_breached() && !ticket.is_terminal() {
            overdue += 1;
        }
        if ticket.priority == TicketPriority::Urgent && !ticket.is_terminal() {
            critical_open += 1;
        }

        if let Some(score) = ticket.satisfaction_score {
            satisfaction_sum += f64::from(score);
            satisfaction_count += 1;
        }
        if let Some(resolved_at) = ticket.resolved_at {
            resolution_sum += (resolved_at - ticket.created_at).num_seconds() as f64 / 60.0;
            resolution_count += 1;
        }
    }

    TicketStats {
        total,
        open,
        in_progress,
        resolved,
        closed,
        overdue,
        critical_open,
        sla,
        by_priority,
        avg_satisfaction: mean(satisfaction_sum, satisfaction_count),
        avg_resolution_minutes: mean(resolution_sum, resolution_count),
        resolution_rate: percentage(resolved + closed, total),
        sla_compliance: percentage(total - overdue, total),
    }
}
