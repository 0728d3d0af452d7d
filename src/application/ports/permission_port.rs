use async_trait::async_trait;
use uuid::Uuid;

use crate::application::access::{Actor, Capability};

/// Opaque permission check. How the decision is made is not this crate's
/// concern.
#[async_trait]
pub trait PermissionPort: Send + Sync {
    async fn capability(&self, actor: &Actor, project_id: Uuid) -> anyhow::Result<Capability>;
}
