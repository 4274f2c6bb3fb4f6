// ============================================================================
// Desk Core - Ticket Entity
// File: crates/desk-core/src/domain/ticket.rs
// Description: Ticket entity with status lifecycle and SLA configuration
// ============================================================================

use chrono::{DateTime, Utc};
use desk_shared::config::SlaSettings;
use desk_shared::constants::{MAX_SATISFACTION_SCORE, MIN_SATISFACTION_SCORE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// Ticket status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Resolved => "RESOLVED",
            TicketStatus::Closed => "CLOSED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "OPEN" => Some(TicketStatus::Open),
            "IN_PROGRESS" => Some(TicketStatus::InProgress),
            "RESOLVED" => Some(TicketStatus::Resolved),
            "CLOSED" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    /// RESOLVED and CLOSED stop the SLA clock.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }

    pub(crate) fn rank(&self) -> u8 {
        match self {
            TicketStatus::Open => 0,
            TicketStatus::InProgress => 1,
            TicketStatus::Resolved => 2,
            TicketStatus::Closed => 3,
        }
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        TicketStatus::Open
    }
}

/// Ticket priority enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    #[serde(alias = "CRITICAL")]
    Urgent,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "LOW",
            TicketPriority::Medium => "MEDIUM",
            TicketPriority::High => "HIGH",
            TicketPriority::Urgent => "URGENT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Some(TicketPriority::Low),
            "MEDIUM" => Some(TicketPriority::Medium),
            "HIGH" => Some(TicketPriority::High),
            "URGENT" | "CRITICAL" => Some(TicketPriority::Urgent),
            _ => None,
        }
    }

    pub(crate) fn rank(&self) -> u8 {
        match self {
            TicketPriority::Low => 0,
            TicketPriority::Medium => 1,
            TicketPriority::High => 2,
            TicketPriority::Urgent => 3,
        }
    }
}

impl Default for TicketPriority {
    fn default() -> Self {
        TicketPriority::Medium
    }
}

/// Ticket entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 10000, message = "Description too long"))]
    pub description: String,

    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: Option<String>,

    #[validate(email(message = "Customer email is not a valid address"))]
    pub customer_email: Option<String>,

    pub created_by_id: Uuid,
    pub assigned_to_id: Option<Uuid>,

    #[validate(range(min = 1, max = 525600, message = "SLA must be between one minute and one year"))]
    pub sla_minutes: i64,

    #[validate(range(min = 0, max = 100, message = "SLA warning percent must be between 0 and 100"))]
    pub sla_warning_percent: i64,

    #[validate(range(min = 1, max = 5, message = "Satisfaction score must be between 1 and 5"))]
    pub satisfaction_score: Option<i32>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Input accepted when opening a ticket.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TicketPriority,
    pub category: Option<String>,
    pub customer_email: Option<String>,
    pub created_by_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
    pub sla_minutes: Option<i64>,
    pub sla_warning_percent: Option<i64>,
}

impl Ticket {
    pub fn new(
        tenant_id: Uuid,
        input: NewTicket,
        sla_defaults: &SlaSettings,
        now: DateTime<Utc>,
    ) -> Result<Self, validator::ValidationErrors> {
        let ticket = Self {
            id: Uuid::new_v4(),
            tenant_id,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            status: TicketStatus::Open,
            priority: input.priority,
            category: input
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            customer_email: input
                .customer_email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            created_by_id: input.created_by_id,
            assigned_to_id: input.assigned_to_id,
            sla_minutes: input.sla_minutes.unwrap_or(sla_defaults.default_minutes),
            sla_warning_percent: input
                .sla_warning_percent
                .unwrap_or(sla_defaults.default_warning_percent),
            satisfaction_score: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        };

        ticket.validate()?;
        Ok(ticket)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Moves the ticket forward to `status`. The lifecycle only advances
    /// (OPEN, IN_PROGRESS, then RESOLVED or CLOSED, with RESOLVED able to
    /// close), so `resolved_at` is stamped once and never cleared.
    pub fn transition_to(&mut self, status: TicketStatus, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status == status {
            return Ok(());
        }
        if status.rank() < self.status.rank() {
            return Err(DomainError::InvalidTransition(format!(
                "ticket {} cannot move from {} back to {}",
                self.id,
                self.status.as_str(),
                status.as_str()
            )));
        }

        self.status = status;
        if status.is_terminal() && self.resolved_at.is_none() {
            self.resolved_at = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn assign_to(&mut self, assignee: Option<Uuid>, now: DateTime<Utc>) {
        self.assigned_to_id = assignee;
        self.updated_at = now;
    }

    pub fn rate(&mut self, score: i32, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_terminal() {
            return Err(DomainError::InvalidTransition(format!(
                "ticket {} must be resolved or closed before it can be rated",
                self.id
            )));
        }
        if !(MIN_SATISFACTION_SCORE..=MAX_SATISFACTION_SCORE).contains(&score) {
            return Err(DomainError::ValidationError(format!(
                "Satisfaction score must be between {} and {}",
                MIN_SATISFACTION_SCORE, MAX_SATISFACTION_SCORE
            )));
        }

        self.satisfaction_score = Some(score);
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn new_ticket(title: &str) -> NewTicket {
        NewTicket {
            title: title.to_string(),
            description: "VPN drops every ten minutes".to_string(),
            created_by_id: Uuid::new_v4(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_ticket_applies_defaults() {
        let ticket = Ticket::new(
            Uuid::new_v4(),
            new_ticket("  VPN unstable  "),
            &SlaSettings::default(),
            now(),
        )
        .unwrap();

        assert_eq!(ticket.title, "VPN unstable");
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::Medium);
        assert_eq!(ticket.sla_minutes, 240);
        assert_eq!(ticket.sla_warning_percent, 75);
        assert_eq!(ticket.created_at, now());
        assert!(ticket.resolved_at.is_none());
    }

    #[test]
    fn test_create_ticket_rejects_blank_title() {
        let result = Ticket::new(Uuid::new_v4(), new_ticket("   "), &SlaSettings::default(), now());
        assert!(result.is_err());
    }

    #[test]
    fn test_create_ticket_rejects_bad_sla() {
        let mut input = new_ticket("Printer jam");
        input.sla_warning_percent = Some(120);
        assert!(Ticket::new(Uuid::new_v4(), input, &SlaSettings::default(), now()).is_err());

        let mut input = new_ticket("Printer jam");
        input.sla_minutes = Some(0);
        assert!(Ticket::new(Uuid::new_v4(), input, &SlaSettings::default(), now()).is_err());

        let mut input = new_ticket("Printer jam");
        input.sla_minutes = Some(i64::MAX);
        assert!(Ticket::new(Uuid::new_v4(), input, &SlaSettings::default(), now()).is_err());

        let mut input = new_ticket("Printer jam");
        input.sla_minutes = Some(525_600);
        assert!(Ticket::new(Uuid::new_v4(), input, &SlaSettings::default(), now()).is_ok());
    }

    #[test]
    fn test_create_ticket_rejects_bad_customer_email() {
        let mut input = new_ticket("Printer jam");
        input.customer_email = Some("not-an-email".to_string());
        assert!(Ticket::new(Uuid::new_v4(), input, &SlaSettings::default(), now()).is_err());
    }

    #[test]
    fn test_resolved_at_set_once() {
        let mut ticket =
            Ticket::new(Uuid::new_v4(), new_ticket("Disk full"), &SlaSettings::default(), now())
                .unwrap();

        ticket.transition_to(TicketStatus::InProgress, now() + Duration::minutes(5)).unwrap();
        assert!(ticket.resolved_at.is_none());

        let resolved = now() + Duration::minutes(30);
        ticket.transition_to(TicketStatus::Resolved, resolved).unwrap();
        assert_eq!(ticket.resolved_at, Some(resolved));

        ticket.transition_to(TicketStatus::Closed, now() + Duration::minutes(90)).unwrap();
        assert_eq!(ticket.resolved_at, Some(resolved));
        assert_eq!(ticket.updated_at, now() + Duration::minutes(90));
    }

    #[test]
    fn test_reopen_is_rejected_and_keeps_first_resolution() {
        let mut ticket =
            Ticket::new(Uuid::new_v4(), new_ticket("Disk full"), &SlaSettings::default(), now())
                .unwrap();
        let resolved = now() + Duration::minutes(10);
        ticket.transition_to(TicketStatus::Resolved, resolved).unwrap();

        let result = ticket.transition_to(TicketStatus::Open, now() + Duration::minutes(20));
        assert!(matches!(result, Err(DomainError::InvalidTransition(_))));

        ticket.transition_to(TicketStatus::Resolved, now() + Duration::minutes(30)).unwrap();
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert_eq!(ticket.resolved_at, Some(resolved));
        assert_eq!(ticket.updated_at, resolved);
    }

    #[test]
    fn test_backward_transitions_rejected() {
        let mut ticket =
            Ticket::new(Uuid::new_v4(), new_ticket("Disk full"), &SlaSettings::default(), now())
                .unwrap();
        ticket.transition_to(TicketStatus::InProgress, now()).unwrap();
        assert!(ticket.transition_to(TicketStatus::Open, now()).is_err());

        ticket.transition_to(TicketStatus::Closed, now()).unwrap();
        assert!(ticket.transition_to(TicketStatus::Resolved, now()).is_err());
        assert_eq!(ticket.status, TicketStatus::Closed);
    }

    #[test]
    fn test_open_can_resolve_directly() {
        let mut ticket =
            Ticket::new(Uuid::new_v4(), new_ticket("Disk full"), &SlaSettings::default(), now())
                .unwrap();
        assert!(ticket.transition_to(TicketStatus::Resolved, now()).is_ok());
        assert_eq!(ticket.resolved_at, Some(now()));
    }

    #[test]
    fn test_rate_requires_terminal_status() {
        let mut ticket =
            Ticket::new(Uuid::new_v4(), new_ticket("Disk full"), &SlaSettings::default(), now())
                .unwrap();

        assert!(matches!(ticket.rate(5, now()), Err(DomainError::InvalidTransition(_))));

        ticket.transition_to(TicketStatus::Resolved, now()).unwrap();
        assert!(matches!(ticket.rate(9, now()), Err(DomainError::ValidationError(_))));
        assert!(ticket.rate(4, now()).is_ok());
        assert_eq!(ticket.satisfaction_score, Some(4));
    }

    #[test]
    fn test_status_and_priority_parsing() {
        assert_eq!(TicketStatus::from_str("in-progress"), Some(TicketStatus::InProgress));
        assert_eq!(TicketStatus::from_str("CLOSED"), Some(TicketStatus::Closed));
        assert_eq!(TicketStatus::from_str("pending"), None);
        assert_eq!(TicketPriority::from_str("critical"), Some(TicketPriority::Urgent));
        assert_eq!(TicketPriority::from_str("whatever"), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let ticket =
            Ticket::new(Uuid::new_v4(), new_ticket("Disk full"), &SlaSettings::default(), now())
                .unwrap();
        let json = serde_json::to_value(&ticket).unwrap();

        assert_eq!(json["status"], "OPEN");
        assert_eq!(json["priority"], "MEDIUM");
        assert_eq!(json["slaMinutes"], 240);
        assert_eq!(json["slaWarningPercent"], 75);
        assert!(json.get("createdAt").is_some());

        let priority: TicketPriority = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(priority, TicketPriority::Urgent);
    }
}
