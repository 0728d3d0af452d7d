use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::permission_port::PermissionPort;
use crate::application::use_cases::documents::error::DocumentUseCaseError;
use crate::domain::documents::document::{DocumentPatch, DocumentRecord};

pub struct UpdateDocument<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub repo: &'a R,
    pub permissions: &'a P,
}

impl<'a, R, P> UpdateDocument<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        project_id: Uuid,
        id: Uuid,
        patch: DocumentPatch,
    ) -> Result<DocumentRecord, DocumentUseCaseError> {
        access::require_edit(self.permissions, actor, project_id).await?;
        let mut store = self
            .repo
            .load_store(project_id)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
        let updated = store.update(id, patch)?.clone();
        self.repo
            .save_store(&store)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
        tracing::info!(%project_id, doc_id = %id, "document_updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{AllowAll, memory_repo};
    use crate::domain::documents::document::DocumentFields;
    use crate::domain::documents::status::DocumentStatus;

    #[tokio::test]
    async fn unknown_document_is_reported() {
        let repo = memory_repo();
        let uc = UpdateDocument {
            repo: &repo,
            permissions: &AllowAll,
        };
        let missing = Uuid::new_v4();
        let err = uc
            .execute(
                &Actor::User("ana".into()),
                Uuid::new_v4(),
                missing,
                DocumentPatch::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentUseCaseError::NotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn patch_is_persisted() {
        let repo = memory_repo();
        let project = Uuid::new_v4();
        let mut store = repo.load_store(project).await.unwrap();
        let id = store.add(DocumentFields::default()).id;
        repo.save_store(&store).await.unwrap();

        let uc = UpdateDocument {
            repo: &repo,
            permissions: &AllowAll,
        };
        uc.execute(
            &Actor::User("ana".into()),
            project,
            id,
            DocumentPatch {
                status: Some(DocumentStatus::Finished),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let reloaded = repo.load_store(project).await.unwrap();
        assert_eq!(reloaded.get(id).unwrap().status, DocumentStatus::Finished);
    }
}
