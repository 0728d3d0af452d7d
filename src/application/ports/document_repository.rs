use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::documents::store::DocumentStore;
use crate::domain::meetings::meeting::MeetingMetadata;

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    // Unknown projects load as an empty store
    async fn load_store(&self, project_id: Uuid) -> anyhow::Result<DocumentStore>;

    async fn save_store(&self, store: &DocumentStore) -> anyhow::Result<()>;

    async fn list_meetings(&self, project_id: Uuid) -> anyhow::Result<Vec<MeetingMetadata>>;

    async fn save_meetings(
        &self,
        project_id: Uuid,
        meetings: &[MeetingMetadata],
    ) -> anyhow::Result<()>;
}
