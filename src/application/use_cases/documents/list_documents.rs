use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::permission_port::PermissionPort;
use crate::application::services::filters::{FilterCriteria, apply_filters};
use crate::application::use_cases::documents::error::DocumentUseCaseError;
use crate::domain::documents::document::DocumentRecord;

pub struct ListDocuments<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub repo: &'a R,
    pub permissions: &'a P,
}

impl<'a, R, P> ListDocuments<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        project_id: Uuid,
        criteria: &FilterCriteria,
    ) -> Result<Vec<DocumentRecord>, DocumentUseCaseError> {
        access::require_view(self.permissions, actor, project_id).await?;
        let store = self
            .repo
            .load_store(project_id)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
        Ok(apply_filters(store.records(), criteria)
            .into_iter()
            .cloned()
            .collect())
    }
}
