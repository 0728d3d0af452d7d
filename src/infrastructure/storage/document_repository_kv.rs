use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::kv_store::KvStore;
use crate::domain::documents::document::DocumentRecord;
use crate::domain::documents::store::DocumentStore;
use crate::domain::meetings::meeting::MeetingMetadata;

const DOCUMENTS_KEY: &str = "documents";
const MEETINGS_KEY: &str = "meetings";

/// Persists each project's record set as one JSON array per key.
pub struct KvDocumentRepository {
    kv: Arc<dyn KvStore>,
}

impl KvDocumentRepository {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    fn namespace(project_id: Uuid) -> String {
        format!("project:{project_id}")
    }
}

#[async_trait]
impl DocumentRepository for KvDocumentRepository {
    async fn load_store(&self, project_id: Uuid) -> anyhow::Result<DocumentStore> {
        let value = self
            .kv
            .get(&Self::namespace(project_id), DOCUMENTS_KEY)
            .await?;
        let records: Vec<DocumentRecord> = match value {
            Some(v) => serde_json::from_value(v)
                .with_context(|| format!("corrupt document set for project {project_id}"))?,
            None => Vec::new(),
        };
        Ok(DocumentStore::from_records(project_id, records))
    }

    async fn save_store(&self, store: &DocumentStore) -> anyhow::Result<()> {
        let value = serde_json::to_value(store.records())?;
        self.kv
            .set(&Self::namespace(store.project_id()), DOCUMENTS_KEY, &value)
            .await
    }

    async fn list_meetings(&self, project_id: Uuid) -> anyhow::Result<Vec<MeetingMetadata>> {
        let value = self
            .kv
            .get(&Self::namespace(project_id), MEETINGS_KEY)
            .await?;
        match value {
            Some(v) => Ok(serde_json::from_value(v)
                .with_context(|| format!("corrupt meeting list for project {project_id}"))?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_meetings(
        &self,
        project_id: Uuid,
        meetings: &[MeetingMetadata],
    ) -> anyhow::Result<()> {
        let value = serde_json::to_value(meetings)?;
        self.kv
            .set(&Self::namespace(project_id), MEETINGS_KEY, &value)
            .await
    }
}
