use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::documents::status::DocumentStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub code: String,
    pub title: String,
    pub detail: String,
    pub revision: String,
    pub owner: String,
    pub status: DocumentStatus,
    pub area: String,
    #[serde(default)]
    pub participants: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub baseline_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_cleared: bool,
}

impl DocumentRecord {
    /// False when both dates are known and the end precedes the start.
    /// Upstream sheets are untrusted, so this is reported, never enforced.
    pub fn has_consistent_dates(&self) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => end >= start,
            _ => true,
        }
    }
}

/// Caller-supplied content of a record. Identity and timestamps belong to
/// the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentFields {
    pub code: String,
    pub title: String,
    pub detail: String,
    pub revision: String,
    pub owner: String,
    pub status: DocumentStatus,
    pub area: String,
    pub participants: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub baseline_date: Option<NaiveDate>,
}

impl DocumentFields {
    /// True when the row carried nothing worth keeping.
    pub fn is_blank(&self) -> bool {
        self.code.is_empty()
            && self.title.is_empty()
            && self.detail.is_empty()
            && self.revision.is_empty()
            && self.owner.is_empty()
            && self.area.is_empty()
            && self.participants.is_empty()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.baseline_date.is_none()
    }
}

// Date fields: None => not provided; Some(None) => set null; Some(Some(d)) => set value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    pub code: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub revision: Option<String>,
    pub owner: Option<String>,
    pub status: Option<DocumentStatus>,
    pub area: Option<String>,
    pub participants: Option<Vec<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub baseline_date: Option<Option<NaiveDate>>,
}

impl DocumentPatch {
    pub fn is_empty(&self) -> bool {
        *self == DocumentPatch::default()
    }

    pub(crate) fn apply_to(self, record: &mut DocumentRecord) {
        if let Some(v) = self.code {
            record.code = v;
        }
        if let Some(v) = self.title {
            record.title = v;
        }
        if let Some(v) = self.detail {
            record.detail = v;
        }
        if let Some(v) = self.revision {
            record.revision = v;
        }
        if let Some(v) = self.owner {
            record.owner = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.area {
            record.area = v;
        }
        if let Some(v) = self.participants {
            record.participants = v;
        }
        if let Some(v) = self.start_date {
            record.start_date = v;
        }
        if let Some(v) = self.end_date {
            record.end_date = v;
        }
        if let Some(v) = self.baseline_date {
            record.baseline_date = v;
        }
    }
}
