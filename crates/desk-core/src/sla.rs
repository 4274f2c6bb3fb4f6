//! SLA status calculator
//!
//! SLA state is never stored. It is a projection of a ticket's status,
//! creation instant and SLA terms onto an observation instant `now`, which
//! callers capture once per operation and pass in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Ticket;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Tri-state SLA indicator, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlaStatus {
    Green,
    Yellow,
    Red,
}

impl SlaStatus {
    pub fn severity(&self) -> u8 {
        match self {
            SlaStatus::Green => 0,
            SlaStatus::Yellow => 1,
            SlaStatus::Red => 2,
        }
    }

    pub fn is_breached(&self) -> bool {
        matches!(self, SlaStatus::Red)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaSnapshot {
    pub status: SlaStatus,
    pub remaining_minutes: i64,
}

/// Whole minutes between creation and `now`, floored.
pub fn elapsed_minutes(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_milliseconds().div_euclid(MILLIS_PER_MINUTE)
}

/// Elapsed minutes at which the ticket turns YELLOW. Not rounded.
pub fn warning_threshold_minutes(ticket: &Ticket) -> f64 {
    ticket.sla_minutes as f64 * ticket.sla_warning_percent as f64 / 100.0
}

/// Computes the SLA status and remaining minutes of `ticket` as seen at `now`.
///
/// Resolved and closed tickets are always GREEN with nothing remaining, no
/// matter how late they were resolved. Inputs are not validated: a zero or
/// negative budget simply reads as permanently RED.
pub fn compute_sla_status(ticket: &Ticket, now: DateTime<Utc>) -> SlaSnapshot {
    if ticket.is_terminal() {
        return SlaSnapshot {
            status: SlaStatus::Green,
            remaining_minutes: 0,
        };
    }

    let elapsed = elapsed_minutes(ticket.created_at, now);
    let status = if elapsed >= ticket.sla_minutes {
        SlaStatus::Red
    } else if elapsed as f64 >= warning_threshold_minutes(ticket) {
        SlaStatus::Yellow
    } else {
        SlaStatus::Green
    };

    SlaSnapshot {
        status,
        remaining_minutes: ticket.sla_minutes.saturating_sub(elapsed).max(0),
    }
}
