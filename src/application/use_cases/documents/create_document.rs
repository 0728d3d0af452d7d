use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::permission_port::PermissionPort;
use crate::application::use_cases::documents::error::DocumentUseCaseError;
use crate::domain::documents::document::{DocumentFields, DocumentRecord};

pub struct CreateDocument<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub repo: &'a R,
    pub permissions: &'a P,
}

impl<'a, R, P> CreateDocument<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        project_id: Uuid,
        fields: DocumentFields,
    ) -> Result<DocumentRecord, DocumentUseCaseError> {
        access::require_edit(self.permissions, actor, project_id).await?;
        let mut store = self
            .repo
            .load_store(project_id)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
        let created = store.add(fields).clone();
        self.repo
            .save_store(&store)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
        tracing::info!(%project_id, doc_id = %created.id, "document_created");
        Ok(created)
    }
}
