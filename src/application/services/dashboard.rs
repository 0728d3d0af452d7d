use serde::Serialize;
use utoipa::ToSchema;

use crate::application::services::filters::{FilterCriteria, apply_filters};
use crate::domain::documents::aggregate;
use crate::domain::documents::document::DocumentRecord;
use crate::domain::documents::summary::{StatusDistribution, TimelinePoint};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub status_distribution: Vec<StatusDistribution>,
    pub timeline: Vec<TimelinePoint>,
}

/// Filters, then aggregates. Cleared records never reach the aggregates,
/// even when the criteria ask to include them in the listing.
pub fn summarize<'a, I>(records: I, criteria: &FilterCriteria) -> DashboardSummary
where
    I: IntoIterator<Item = &'a DocumentRecord>,
{
    let visible: Vec<&DocumentRecord> = apply_filters(records, criteria)
        .into_iter()
        .filter(|r| !r.is_cleared)
        .collect();
    DashboardSummary {
        total: visible.len(),
        status_distribution: aggregate::status_distribution(visible.iter().copied()),
        timeline: aggregate::timeline(visible.iter().copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::filters::TextField;
    use crate::domain::documents::document::DocumentFields;
    use crate::domain::documents::status::DocumentStatus;
    use crate::domain::documents::store::DocumentStore;
    use uuid::Uuid;

    #[test]
    fn summary_reflects_filtered_subset() {
        let mut store = DocumentStore::new(Uuid::new_v4());
        for (area, status) in [
            ("Civil", DocumentStatus::Finished),
            ("Civil", DocumentStatus::ToStart),
            ("Mecânica", DocumentStatus::InProgress),
        ] {
            store.add(DocumentFields {
                area: area.into(),
                status,
                ..Default::default()
            });
        }

        let criteria = FilterCriteria::default().with_set(TextField::Area, ["Civil"]);
        let summary = summarize(store.records(), &criteria);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.status_distribution.len(), 2);
        assert!(
            summary
                .status_distribution
                .iter()
                .all(|d| d.status != DocumentStatus::InProgress)
        );
        assert_eq!(summary.timeline.len(), 1);
        assert_eq!(summary.timeline[0].created, 2);
    }

    #[test]
    fn cleared_records_stay_out_of_aggregates() {
        let mut store = DocumentStore::new(Uuid::new_v4());
        let id = store.add(DocumentFields::default()).id;
        store.clear(id).unwrap();
        let criteria = FilterCriteria {
            include_cleared: true,
            ..Default::default()
        };
        let summary = summarize(store.records(), &criteria);
        assert_eq!(summary.total, 0);
        assert!(summary.status_distribution.is_empty());
        assert!(summary.timeline.is_empty());
    }
}
