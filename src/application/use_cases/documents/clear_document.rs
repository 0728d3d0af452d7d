use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::permission_port::PermissionPort;
use crate::application::use_cases::documents::error::DocumentUseCaseError;
use crate::domain::documents::document::DocumentRecord;

/// Soft delete and its undo.
pub struct ClearDocument<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub repo: &'a R,
    pub permissions: &'a P,
}

impl<'a, R, P> ClearDocument<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub async fn clear(
        &self,
        actor: &Actor,
        project_id: Uuid,
        id: Uuid,
    ) -> Result<DocumentRecord, DocumentUseCaseError> {
        self.set_cleared(actor, project_id, id, true).await
    }

    pub async fn restore(
        &self,
        actor: &Actor,
        project_id: Uuid,
        id: Uuid,
    ) -> Result<DocumentRecord, DocumentUseCaseError> {
        self.set_cleared(actor, project_id, id, false).await
    }

    async fn set_cleared(
        &self,
        actor: &Actor,
        project_id: Uuid,
        id: Uuid,
        cleared: bool,
    ) -> Result<DocumentRecord, DocumentUseCaseError> {
        access::require_edit(self.permissions, actor, project_id).await?;
        let mut store = self
            .repo
            .load_store(project_id)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
        let record = if cleared {
            store.clear(id)?.clone()
        } else {
            store.restore(id)?.clone()
        };
        self.repo
            .save_store(&store)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
        tracing::info!(%project_id, doc_id = %id, cleared, "document_cleared_flag_set");
        Ok(record)
    }
}
