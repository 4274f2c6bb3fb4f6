//! Ticket builders shared by unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{DirectoryUser, Ticket, TicketPriority, TicketStatus};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap()
}

pub fn minutes_after_epoch(minutes: i64) -> DateTime<Utc> {
    epoch() + Duration::minutes(minutes)
}

pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            ticket: Ticket {
                id: Uuid::new_v4(),
                tenant_id: Uuid::nil(),
                title: title.to_string(),
                description: String::new(),
                status: TicketStatus::Open,
                priority: TicketPriority::Medium,
                category: None,
                customer_email: None,
                created_by_id: Uuid::new_v4(),
                assigned_to_id: None,
                sla_minutes: 240,
                sla_warning_percent: 75,
                satisfaction_score: None,
                created_at: epoch(),
                updated_at: epoch(),
                resolved_at: None,
            },
        }
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.ticket.status = status;
        if status.is_terminal() && self.ticket.resolved_at.is_none() {
            self.ticket.resolved_at = Some(self.ticket.created_at + Duration::minutes(30));
        }
        self
    }

    pub fn priority(mut self, priority: TicketPriority) -> Self {
        self.ticket.priority = priority;
        self
    }

    pub fn created_minutes_after_epoch(mut self, minutes: i64) -> Self {
        self.ticket.created_at = minutes_after_epoch(minutes);
        self.ticket.updated_at = self.ticket.created_at;
        self
    }

    pub fn sla(mut self, minutes: i64, warning_percent: i64) -> Self {
        self.ticket.sla_minutes = minutes;
        self.ticket.sla_warning_percent = warning_percent;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.ticket.description = description.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.ticket.category = Some(category.to_string());
        self
    }

    pub fn customer_email(mut self, email: &str) -> Self {
        self.ticket.customer_email = Some(email.to_string());
        self
    }

    pub fn created_by(mut self, user_id: Uuid) -> Self {
        self.ticket.created_by_id = user_id;
        self
    }

    pub fn assigned_to(mut self, user_id: Uuid) -> Self {
        self.ticket.assigned_to_id = Some(user_id);
        self
    }

    pub fn resolved_after(mut self, minutes: i64) -> Self {
        self.ticket.resolved_at = Some(self.ticket.created_at + Duration::minutes(minutes));
        self
    }

    pub fn satisfaction(mut self, score: i32) -> Self {
        self.ticket.satisfaction_score = Some(score);
        self
    }

    pub fn build(self) -> Ticket {
        self.ticket
    }
}

pub fn directory_user(email: &str, team_id: Option<Uuid>, country: Option<&str>) -> DirectoryUser {
    DirectoryUser {
        id: Uuid::new_v4(),
        tenant_id: Uuid::nil(),
        email: email.to_string(),
        display_name: email.split('@').next().unwrap_or(email).to_string(),
        team_id,
        country: country.map(str::to_string),
        is_active: true,
    }
}
