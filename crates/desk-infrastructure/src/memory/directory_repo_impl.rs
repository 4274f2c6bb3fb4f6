// ============================================================================
// Desk Infrastructure - In-Memory User Directory
// File: crates/desk-infrastructure/src/memory/directory_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use desk_core::domain::DirectoryUser;
use desk_core::error::DomainError;
use desk_core::repositories::UserDirectoryRepository;

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<Uuid, DirectoryUser>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = DirectoryUser>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    pub async fn upsert(&self, user: DirectoryUser) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectoryRepository for InMemoryUserDirectory {
    async fn find_by_id(&self, tenant_id: &Uuid, id: &Uuid) -> Result<Option<DirectoryUser>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .get(id)
            .filter(|u| u.tenant_id == *tenant_id && u.is_active)
            .cloned())
    }

    async fn list_by_tenant(&self, tenant_id: &Uuid) -> Result<Vec<DirectoryUser>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| u.tenant_id == *tenant_id)
            .cloned()
            .collect())
    }
}
