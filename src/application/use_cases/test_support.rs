use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::access::{Actor, Capability};
use crate::application::ports::permission_port::PermissionPort;
use crate::infrastructure::storage::document_repository_kv::KvDocumentRepository;
use crate::infrastructure::storage::memory_kv::InMemoryKvStore;

pub struct AllowAll;

#[async_trait]
impl PermissionPort for AllowAll {
    async fn capability(&self, _actor: &Actor, _project_id: Uuid) -> anyhow::Result<Capability> {
        Ok(Capability::Edit)
    }
}

pub struct DenyAll;

#[async_trait]
impl PermissionPort for DenyAll {
    async fn capability(&self, _actor: &Actor, _project_id: Uuid) -> anyhow::Result<Capability> {
        Ok(Capability::None)
    }
}

pub fn memory_repo() -> KvDocumentRepository {
    KvDocumentRepository::new(Arc::new(InMemoryKvStore::default()))
}
