use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::documents::aggregate;
use crate::domain::documents::document::{DocumentFields, DocumentPatch, DocumentRecord};
use crate::domain::documents::summary::{StatusDistribution, TimelinePoint};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentStoreError {
    #[error("document {0} not found")]
    NotFound(Uuid),
}

/// The record set of a single project. Single owner: callers serialize
/// access themselves.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    project_id: Uuid,
    records: Vec<DocumentRecord>,
}

impl DocumentStore {
    pub fn new(project_id: Uuid) -> Self {
        Self {
            project_id,
            records: Vec::new(),
        }
    }

    /// Rehydrates a store from persisted records. Records belonging to other
    /// projects and repeated ids (after the first) are dropped.
    pub fn from_records(project_id: Uuid, records: Vec<DocumentRecord>) -> Self {
        let mut store = Self::new(project_id);
        for record in records {
            if record.project_id != project_id {
                tracing::warn!(doc_id = %record.id, %project_id, "foreign_record_dropped");
                continue;
            }
            if store.position(record.id).is_some() {
                tracing::warn!(doc_id = %record.id, "duplicate_record_dropped");
                continue;
            }
            store.records.push(record);
        }
        store
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn add(&mut self, fields: DocumentFields) -> &DocumentRecord {
        self.add_at(fields, Utc::now())
    }

    pub fn add_at(&mut self, fields: DocumentFields, now: DateTime<Utc>) -> &DocumentRecord {
        let mut id = Uuid::new_v4();
        while self.position(id).is_some() {
            id = Uuid::new_v4();
        }
        self.records.push(DocumentRecord {
            id,
            project_id: self.project_id,
            code: fields.code,
            title: fields.title,
            detail: fields.detail,
            revision: fields.revision,
            owner: fields.owner,
            status: fields.status,
            area: fields.area,
            participants: fields.participants,
            start_date: fields.start_date,
            end_date: fields.end_date,
            baseline_date: fields.baseline_date,
            created_at: now,
            updated_at: now,
            is_cleared: false,
        });
        let last = self.records.len() - 1;
        &self.records[last]
    }

    pub fn update(
        &mut self,
        id: Uuid,
        patch: DocumentPatch,
    ) -> Result<&DocumentRecord, DocumentStoreError> {
        self.update_at(id, patch, Utc::now())
    }

    pub fn update_at(
        &mut self,
        id: Uuid,
        patch: DocumentPatch,
        now: DateTime<Utc>,
    ) -> Result<&DocumentRecord, DocumentStoreError> {
        let idx = self.position(id).ok_or(DocumentStoreError::NotFound(id))?;
        let record = &mut self.records[idx];
        patch.apply_to(record);
        record.updated_at = now;
        Ok(record)
    }

    /// Soft delete. Clearing an already cleared record changes nothing.
    pub fn clear(&mut self, id: Uuid) -> Result<&DocumentRecord, DocumentStoreError> {
        self.set_cleared(id, true, Utc::now())
    }

    pub fn clear_at(
        &mut self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<&DocumentRecord, DocumentStoreError> {
        self.set_cleared(id, true, now)
    }

    pub fn restore(&mut self, id: Uuid) -> Result<&DocumentRecord, DocumentStoreError> {
        self.set_cleared(id, false, Utc::now())
    }

    fn set_cleared(
        &mut self,
        id: Uuid,
        cleared: bool,
        now: DateTime<Utc>,
    ) -> Result<&DocumentRecord, DocumentStoreError> {
        let idx = self.position(id).ok_or(DocumentStoreError::NotFound(id))?;
        let record = &mut self.records[idx];
        if record.is_cleared != cleared {
            record.is_cleared = cleared;
            record.updated_at = now;
        }
        Ok(record)
    }

    pub fn get(&self, id: Uuid) -> Option<&DocumentRecord> {
        self.position(id).map(|idx| &self.records[idx])
    }

    pub fn list(&self, include_cleared: bool) -> Vec<&DocumentRecord> {
        self.records
            .iter()
            .filter(|r| include_cleared || !r.is_cleared)
            .collect()
    }

    pub fn status_distribution(&self) -> Vec<StatusDistribution> {
        aggregate::status_distribution(self.list(false))
    }

    pub fn timeline(&self) -> Vec<TimelinePoint> {
        aggregate::timeline(self.list(false))
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}
