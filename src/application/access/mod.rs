use uuid::Uuid;

use crate::application::ports::permission_port::PermissionPort;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Actor {
    User(String),
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    None,
    View,
    Edit,
}

#[derive(thiserror::Error, Debug)]
pub enum AccessError {
    #[error("access denied")]
    Denied,
    #[error("permission check failed")]
    Check(#[source] anyhow::Error),
}

// Presentation layer is responsible for building Actor from HTTP inputs.

pub async fn require_view<P>(
    permissions: &P,
    actor: &Actor,
    project_id: Uuid,
) -> Result<Capability, AccessError>
where
    P: PermissionPort + ?Sized,
{
    require(permissions, actor, project_id, Capability::View).await
}

pub async fn require_edit<P>(
    permissions: &P,
    actor: &Actor,
    project_id: Uuid,
) -> Result<Capability, AccessError>
where
    P: PermissionPort + ?Sized,
{
    require(permissions, actor, project_id, Capability::Edit).await
}

async fn require<P>(
    permissions: &P,
    actor: &Actor,
    project_id: Uuid,
    needed: Capability,
) -> Result<Capability, AccessError>
where
    P: PermissionPort + ?Sized,
{
    let cap = permissions
        .capability(actor, project_id)
        .await
        .map_err(AccessError::Check)?;
    if cap >= needed {
        Ok(cap)
    } else {
        tracing::debug!(?actor, %project_id, ?cap, ?needed, "access_denied");
        Err(AccessError::Denied)
    }
}
