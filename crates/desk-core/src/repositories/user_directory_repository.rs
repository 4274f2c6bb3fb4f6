//! User directory repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::DirectoryUser;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryRepository: Send + Sync {
    async fn find_by_id(&self, tenant_id: &Uuid, id: &Uuid) -> Result<Option<DirectoryUser>, DomainError>;
    async fn list_by_tenant(&self, tenant_id: &Uuid) -> Result<Vec<DirectoryUser>, DomainError>;
}
