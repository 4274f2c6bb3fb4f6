//! User directory capability used by cross-entity ticket filters.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::DirectoryUser;

/// Resolves the team, country and email of a user referenced by a ticket.
pub trait UserDirectory {
    fn team_of(&self, user_id: &Uuid) -> Option<Uuid>;
    fn country_of(&self, user_id: &Uuid) -> Option<&str>;
    fn email_of(&self, user_id: &Uuid) -> Option<&str>;
}

/// Materialized directory, built by the caller before running a query.
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    users: HashMap<Uuid, DirectoryUser>,
}

impl DirectorySnapshot {
    pub fn new(users: impl IntoIterator<Item = DirectoryUser>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }
}

impl UserDirectory for DirectorySnapshot {
    fn team_of(&self, user_id: &Uuid) -> Option<Uuid> {
        self.users.get(user_id).and_then(|u| u.team_id)
    }

    fn country_of(&self, user_id: &Uuid) -> Option<&str> {
        self.users.get(user_id).and_then(|u| u.country.as_deref())
    }

    fn email_of(&self, user_id: &Uuid) -> Option<&str> {
        self.users.get(user_id).map(|u| u.email.as_str())
    }
}
