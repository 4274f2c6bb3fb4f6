//! Ticket filter criteria
//!
//! `TicketQueryParams` is the raw, stringly shape a query string arrives in.
//! `TicketFilter` is its typed form. Parsing never fails: a value that cannot
//! be understood turns into a criterion that no ticket satisfies.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use desk_shared::utils::{contains_ignore_case, non_blank, parse_uuid};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::directory::UserDirectory;
use crate::domain::{Ticket, TicketPriority, TicketStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketQueryParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to_id: Option<String>,
    pub created_by_id: Option<String>,
    pub team_id: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search: Option<String>,
}

/// A single typed constraint. `Invalid` matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion<T> {
    Is(T),
    Invalid,
}

impl<T> Criterion<T> {
    fn parse(raw: Option<&str>, parser: impl FnOnce(&str) -> Option<T>) -> Option<Self> {
        non_blank(raw).map(|value| match parser(value) {
            Some(parsed) => Criterion::Is(parsed),
            None => Criterion::Invalid,
        })
    }
}

fn admits<T>(criterion: &Option<Criterion<T>>, predicate: impl FnOnce(&T) -> bool) -> bool {
    match criterion {
        None => true,
        Some(Criterion::Is(value)) => predicate(value),
        Some(Criterion::Invalid) => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFilter {
    pub status: Option<Criterion<TicketStatus>>,
    pub priority: Option<Criterion<TicketPriority>>,
    pub assigned_to_id: Option<Criterion<Uuid>>,
    pub created_by_id: Option<Criterion<Uuid>>,
    pub team_id: Option<Criterion<Uuid>>,
    /// Lowercased.
    pub country: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<Criterion<DateTime<Utc>>>,
    pub end_date: Option<Criterion<DateTime<Utc>>>,
    /// Lowercased.
    pub search: Option<String>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_params(params: &TicketQueryParams) -> Self {
        Self {
            status: Criterion::parse(params.status.as_deref(), TicketStatus::from_str),
            priority: Criterion::parse(params.priority.as_deref(), TicketPriority::from_str),
            assigned_to_id: Criterion::parse(params.assigned_to_id.as_deref(), parse_uuid),
            created_by_id: Criterion::parse(params.created_by_id.as_deref(), parse_uuid),
            team_id: Criterion::parse(params.team_id.as_deref(), parse_uuid),
            country: non_blank(params.country.as_deref()).map(str::to_lowercase),
            category: non_blank(params.category.as_deref()).map(str::to_string),
            start_date: Criterion::parse(params.start_date.as_deref(), |raw| {
                parse_date_bound(raw, false)
            }),
            end_date: Criterion::parse(params.end_date.as_deref(), |raw| {
                parse_date_bound(raw, true)
            }),
            search: non_blank(params.search.as_deref()).map(str::to_lowercase),
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(Criterion::Is(status));
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(Criterion::Is(priority));
        self
    }

    pub fn with_assignee(mut self, user_id: Uuid) -> Self {
        self.assigned_to_id = Some(Criterion::Is(user_id));
        self
    }

    pub fn with_team(mut self, team_id: Uuid) -> Self {
        self.team_id = Some(Criterion::Is(team_id));
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.trim().to_lowercase());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_created_between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(Criterion::Is(start));
        self.end_date = Some(Criterion::Is(end));
        self
    }

    pub fn with_search(mut self, needle: &str) -> Self {
        self.search = Some(needle.trim().to_lowercase());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when team, country or search criteria need directory lookups.
    pub fn needs_directory(&self) -> bool {
        self.team_id.is_some() || self.country.is_some() || self.search.is_some()
    }

    pub fn matches<D: UserDirectory + ?Sized>(&self, ticket: &Ticket, directory: &D) -> bool {
        admits(&self.status, |status| ticket.status == *status)
            && admits(&self.priority, |priority| ticket.priority == *priority)
            && admits(&self.assigned_to_id, |id| ticket.assigned_to_id == Some(*id))
            && admits(&self.created_by_id, |id| ticket.created_by_id == *id)
            && admits(&self.team_id, |team| {
                involved_users(ticket).any(|user| directory.team_of(&user) == Some(*team))
            })
            && self.country.as_deref().map_or(true, |country| {
                involved_users(ticket).any(|user| {
                    directory
                        .country_of(&user)
                        .is_some_and(|c| c.to_lowercase() == country)
                })
            })
            && self
                .category
                .as_deref()
                .map_or(true, |category| ticket.category.as_deref() == Some(category))
            && admits(&self.start_date, |start| ticket.created_at >= *start)
            && admits(&self.end_date, |end| ticket.created_at <= *end)
            && self
                .search
                .as_deref()
                .map_or(true, |needle| matches_search(ticket, needle, directory))
    }
}

/// Assignee first, then creator.
fn involved_users(ticket: &Ticket) -> impl Iterator<Item = Uuid> {
    ticket
        .assigned_to_id
        .into_iter()
        .chain(std::iter::once(ticket.created_by_id))
}

fn matches_search<D: UserDirectory + ?Sized>(ticket: &Ticket, needle: &str, directory: &D) -> bool {
    contains_ignore_case(&ticket.title, needle)
        || contains_ignore_case(&ticket.description, needle)
        || ticket
            .customer_email
            .as_deref()
            .is_some_and(|email| contains_ignore_case(email, needle))
        || directory
            .email_of(&ticket.created_by_id)
            .is_some_and(|email| contains_ignore_case(email, needle))
}

/// Local timestamps as sent by `datetime-local` inputs, read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Accepts an RFC 3339 instant, a timestamp without offset (taken as UTC) or
/// a bare `YYYY-MM-DD` date. A bare date used as an upper bound covers the
/// whole day.
fn parse_date_bound(raw: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(naive.and_utc());
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let moment = if end_of_day {
        date.and_hms_milli_opt(23, 59, 59, 999)?
    } else {
        date.and_hms_opt(0, 0, 0)?
    };
    Some(moment.and_utc())
}
