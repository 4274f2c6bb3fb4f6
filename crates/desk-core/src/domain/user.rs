//! Directory user entity
//!
//! Tickets reference users by id only. The directory supplies the team,
//! country and email used by cross-entity ticket filters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub id: Uuid,
    pub tenant_id: Uuid,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 2, max = 100))]
    pub display_name: String,

    pub team_id: Option<Uuid>,
    pub country: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl DirectoryUser {
    pub fn new(
        tenant_id: Uuid,
        email: String,
        display_name: String,
        team_id: Option<Uuid>,
        country: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: Uuid::new_v4(),
            tenant_id,
            email: email.trim().to_lowercase(),
            display_name: display_name.trim().to_string(),
            team_id,
            country: country.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            is_active: true,
        };

        user.validate()?;
        Ok(user)
    }
}
