use uuid::Uuid;

use crate::application::access::AccessError;
use crate::domain::documents::store::DocumentStoreError;

#[derive(thiserror::Error, Debug)]
pub enum DocumentUseCaseError {
    #[error("document {0} not found")]
    NotFound(Uuid),
    #[error("forbidden")]
    Forbidden(#[source] AccessError),
    #[error("document storage failed")]
    Storage(#[source] anyhow::Error),
}

impl From<DocumentStoreError> for DocumentUseCaseError {
    fn from(err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::NotFound(id) => DocumentUseCaseError::NotFound(id),
        }
    }
}

impl From<AccessError> for DocumentUseCaseError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Check(e) => DocumentUseCaseError::Storage(e),
            denied => DocumentUseCaseError::Forbidden(denied),
        }
    }
}
