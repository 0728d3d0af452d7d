use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Minutes of a project meeting. Feeds meeting lists and report generation;
/// carries no status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeetingMetadata {
    pub id: Uuid,
    pub project_id: Uuid,
    pub date: Option<NaiveDate>,
    pub minute_number: String,
    pub participant: String,
    pub supplier: String,
    pub discipline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingFields {
    pub date: Option<NaiveDate>,
    pub minute_number: String,
    pub participant: String,
    pub supplier: String,
    pub discipline: String,
}

impl MeetingMetadata {
    pub fn new(project_id: Uuid, fields: MeetingFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            date: fields.date,
            minute_number: fields.minute_number,
            participant: fields.participant,
            supplier: fields.supplier,
            discipline: fields.discipline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_meetings_load_without_a_cleared_flag() {
        let id = Uuid::new_v4();
        let project = Uuid::new_v4();
        let meeting: MeetingMetadata = serde_json::from_value(json!({
            "id": id,
            "projectId": project,
            "date": "2024-04-02",
            "minuteNumber": "ATA-001",
            "participant": "Ana",
            "supplier": "Acme",
            "discipline": "Civil",
            "isCleared": true,
        }))
        .unwrap();
        assert_eq!(meeting.id, id);
        let out = serde_json::to_value(&meeting).unwrap();
        assert!(out.get("isCleared").is_none());
    }
}
