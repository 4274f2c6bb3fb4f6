//! Result ordering

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::engine::AnnotatedTicket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Priority,
    Status,
    Title,
    SlaStatus,
    SlaTimeRemaining,
}

impl SortField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "").as_str() {
            "createdat" => Some(SortField::CreatedAt),
            "updatedat" => Some(SortField::UpdatedAt),
            "priority" => Some(SortField::Priority),
            "status" => Some(SortField::Status),
            "title" => Some(SortField::Title),
            "slastatus" => Some(SortField::SlaStatus),
            "slatimeremaining" => Some(SortField::SlaTimeRemaining),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Asc),
            "desc" | "descending" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl TicketSort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Unknown field or order names fall back to the defaults.
    pub fn parse(field: Option<&str>, order: Option<&str>) -> Self {
        Self {
            field: field.and_then(SortField::from_str).unwrap_or_default(),
            order: order.and_then(SortOrder::from_str).unwrap_or_default(),
        }
    }

    pub fn compare(&self, a: &AnnotatedTicket, b: &AnnotatedTicket) -> Ordering {
        let primary = match self.field {
            SortField::CreatedAt => a.ticket.created_at.cmp(&b.ticket.created_at),
            SortField::UpdatedAt => a.ticket.updated_at.cmp(&b.ticket.updated_at),
            SortField::Priority => a.ticket.priority.rank().cmp(&b.ticket.priority.rank()),
            SortField::Status => a.ticket.status.rank().cmp(&b.ticket.status.rank()),
            SortField::Title => a
                .ticket
                .title
                .to_lowercase()
                .cmp(&b.ticket.title.to_lowercase()),
            SortField::SlaStatus => a.sla_status.severity().cmp(&b.sla_status.severity()),
            SortField::SlaTimeRemaining => a.sla_time_remaining.cmp(&b.sla_time_remaining),
        };

        let ordering = primary.then_with(|| a.ticket.id.cmp(&b.ticket.id));
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}
