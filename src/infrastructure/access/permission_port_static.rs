use async_trait::async_trait;
use uuid::Uuid;

use crate::application::access::{Actor, Capability};
use crate::application::ports::permission_port::PermissionPort;

/// Identified users may edit any project; anonymous callers may only look,
/// and only when allowed by configuration.
pub struct StaticPermissionPort {
    pub allow_anonymous_view: bool,
}

#[async_trait]
impl PermissionPort for StaticPermissionPort {
    async fn capability(&self, actor: &Actor, _project_id: Uuid) -> anyhow::Result<Capability> {
        Ok(match actor {
            Actor::User(name) if !name.trim().is_empty() => Capability::Edit,
            Actor::User(_) => Capability::None,
            Actor::Anonymous if self.allow_anonymous_view => Capability::View,
            Actor::Anonymous => Capability::None,
        })
    }
}
