use std::borrow::Cow;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::documents::document::DocumentRecord;
use crate::domain::meetings::meeting::MeetingMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    Code,
    Title,
    Detail,
    Revision,
    Owner,
    Area,
    Status,
    Participant,
    MinuteNumber,
    Supplier,
    Discipline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    Start,
    End,
    Baseline,
    Created,
    MeetingDate,
}

/// Case-insensitive substring match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextCriterion {
    pub field: TextField,
    pub value: String,
}

/// Membership in a set of accepted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SetCriterion {
    pub field: TextField,
    #[schema(value_type = Vec<String>)]
    pub values: BTreeSet<String>,
}

/// Inclusive range; either bound may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DateRangeCriterion {
    pub field: DateField,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub text: Vec<TextCriterion>,
    pub sets: Vec<SetCriterion>,
    pub dates: Vec<DateRangeCriterion>,
    pub include_cleared: bool,
}

impl FilterCriteria {
    pub fn with_text(mut self, field: TextField, value: impl Into<String>) -> Self {
        self.text.push(TextCriterion {
            field,
            value: value.into(),
        });
        self
    }

    pub fn with_set<I, S>(mut self, field: TextField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets.push(SetCriterion {
            field,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_dates(
        mut self,
        field: DateField,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        self.dates.push(DateRangeCriterion { field, start, end });
        self
    }
}

/// Field access shared by every record kind the engine can narrow.
/// Fields a kind does not carry yield no values. Kinds without soft delete
/// keep the default `is_cleared`.
pub trait Filterable {
    fn text_values(&self, field: TextField) -> Vec<Cow<'_, str>>;
    fn date_value(&self, field: DateField) -> Option<NaiveDate>;
    fn is_cleared(&self) -> bool {
        false
    }
}

impl Filterable for DocumentRecord {
    fn text_values(&self, field: TextField) -> Vec<Cow<'_, str>> {
        match field {
            TextField::Code => vec![Cow::Borrowed(self.code.as_str())],
            TextField::Title => vec![Cow::Borrowed(self.title.as_str())],
            TextField::Detail => vec![Cow::Borrowed(self.detail.as_str())],
            TextField::Revision => vec![Cow::Borrowed(self.revision.as_str())],
            TextField::Owner => vec![Cow::Borrowed(self.owner.as_str())],
            TextField::Area | TextField::Discipline => vec![Cow::Borrowed(self.area.as_str())],
            TextField::Status => vec![Cow::Borrowed(self.status.as_str())],
            TextField::Participant => self
                .participants
                .iter()
                .map(|p| Cow::Borrowed(p.as_str()))
                .collect(),
            TextField::MinuteNumber | TextField::Supplier => Vec::new(),
        }
    }

    fn date_value(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::Start => self.start_date,
            DateField::End => self.end_date,
            DateField::Baseline => self.baseline_date,
            DateField::Created => Some(self.created_at.date_naive()),
            DateField::MeetingDate => None,
        }
    }

    fn is_cleared(&self) -> bool {
        self.is_cleared
    }
}

impl Filterable for MeetingMetadata {
    fn text_values(&self, field: TextField) -> Vec<Cow<'_, str>> {
        let value = match field {
            TextField::MinuteNumber => &self.minute_number,
            TextField::Participant => &self.participant,
            TextField::Supplier => &self.supplier,
            TextField::Discipline | TextField::Area => &self.discipline,
            _ => return Vec::new(),
        };
        vec![Cow::Borrowed(value.as_str())]
    }

    fn date_value(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::MeetingDate => self.date,
            _ => None,
        }
    }
}

/// Narrows `records` to those satisfying every criterion. Unset criteria
/// impose nothing; order is preserved.
pub fn apply_filters<'a, T, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a T>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let text: Vec<(TextField, String)> = criteria
        .text
        .iter()
        .filter_map(|c| {
            let needle = c.value.trim().to_lowercase();
            (!needle.is_empty()).then_some((c.field, needle))
        })
        .collect();
    let sets: Vec<(TextField, BTreeSet<&str>)> = criteria
        .sets
        .iter()
        .filter_map(|c| {
            let values: BTreeSet<&str> = c
                .values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect();
            (!values.is_empty()).then_some((c.field, values))
        })
        .collect();
    let dates: Vec<&DateRangeCriterion> = criteria
        .dates
        .iter()
        .filter(|c| c.start.is_some() || c.end.is_some())
        .collect();

    records
        .into_iter()
        .filter(|r| criteria.include_cleared || !r.is_cleared())
        .filter(|r| {
            text.iter().all(|(field, needle)| {
                r.text_values(*field)
                    .iter()
                    .any(|v| v.to_lowercase().contains(needle.as_str()))
            })
        })
        .filter(|r| {
            sets.iter().all(|(field, accepted)| {
                r.text_values(*field)
                    .iter()
                    .any(|v| accepted.contains(v.trim()))
            })
        })
        .filter(|r| {
            dates.iter().all(|c| match r.date_value(c.field) {
                Some(d) => c.start.is_none_or(|s| d >= s) && c.end.is_none_or(|e| d <= e),
                None => false,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::documents::document::DocumentFields;
    use crate::domain::documents::status::DocumentStatus;
    use crate::domain::documents::store::DocumentStore;
    use uuid::Uuid;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn sample_store() -> DocumentStore {
        let mut store = DocumentStore::new(Uuid::new_v4());
        store.add(DocumentFields {
            title: "Memorial descritivo".into(),
            owner: "Ana".into(),
            area: "Civil".into(),
            status: DocumentStatus::Finished,
            participants: vec!["Ana".into(), "Bruno".into()],
            start_date: ymd(2024, 1, 10),
            end_date: ymd(2024, 2, 5),
            ..Default::default()
        });
        store.add(DocumentFields {
            title: "Diagrama unifilar".into(),
            owner: "Carla".into(),
            area: "Elétrica".into(),
            status: DocumentStatus::InProgress,
            start_date: ymd(2024, 3, 1),
            ..Default::default()
        });
        store.add(DocumentFields {
            title: "Planta baixa".into(),
            owner: "Bruno".into(),
            area: "Civil".into(),
            status: DocumentStatus::ToStart,
            ..Default::default()
        });
        store
    }

    fn titles(records: &[&DocumentRecord]) -> Vec<String> {
        records.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn empty_criteria_return_everything_in_order() {
        let store = sample_store();
        let all = store.records();
        let out = apply_filters(all, &FilterCriteria::default());
        let ids: Vec<Uuid> = out.iter().map(|r| r.id).collect();
        let expected: Vec<Uuid> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn blank_values_impose_no_constraint() {
        let store = sample_store();
        let criteria = FilterCriteria::default()
            .with_text(TextField::Title, "  ")
            .with_set(TextField::Area, Vec::<String>::new())
            .with_dates(DateField::Start, None, None);
        assert_eq!(apply_filters(store.records(), &criteria).len(), 3);
    }

    #[test]
    fn text_match_is_case_insensitive_substring() {
        let store = sample_store();
        let criteria = FilterCriteria::default().with_text(TextField::Title, "PLANTA");
        assert_eq!(
            titles(&apply_filters(store.records(), &criteria)),
            vec!["Planta baixa"]
        );
    }

    #[test]
    fn set_match_requires_membership() {
        let store = sample_store();
        let criteria = FilterCriteria::default()
            .with_set(TextField::Status, ["Finished", "ToStart"])
            .with_set(TextField::Area, ["Civil"]);
        assert_eq!(
            titles(&apply_filters(store.records(), &criteria)),
            vec!["Memorial descritivo", "Planta baixa"]
        );

        let none = FilterCriteria::default().with_set(TextField::Owner, ["Zé"]);
        assert!(apply_filters(store.records(), &none).is_empty());
    }

    #[test]
    fn multi_valued_participants_match_any_member() {
        let store = sample_store();
        let criteria = FilterCriteria::default().with_set(TextField::Participant, ["Bruno"]);
        assert_eq!(
            titles(&apply_filters(store.records(), &criteria)),
            vec!["Memorial descritivo"]
        );
    }

    #[test]
    fn date_ranges_are_inclusive_and_honour_single_bounds() {
        let store = sample_store();
        let both = FilterCriteria::default().with_dates(
            DateField::Start,
            ymd(2024, 1, 10),
            ymd(2024, 3, 1),
        );
        assert_eq!(apply_filters(store.records(), &both).len(), 2);

        let only_start =
            FilterCriteria::default().with_dates(DateField::Start, ymd(2024, 2, 1), None);
        assert_eq!(
            titles(&apply_filters(store.records(), &only_start)),
            vec!["Diagrama unifilar"]
        );

        let only_end = FilterCriteria::default().with_dates(DateField::End, None, ymd(2024, 2, 5));
        assert_eq!(
            titles(&apply_filters(store.records(), &only_end)),
            vec!["Memorial descritivo"]
        );
    }

    #[test]
    fn cleared_records_only_appear_on_request() {
        let mut store = sample_store();
        let id = store.records()[0].id;
        store.clear(id).unwrap();

        assert_eq!(apply_filters(store.records(), &FilterCriteria::default()).len(), 2);
        let with_cleared = FilterCriteria {
            include_cleared: true,
            ..Default::default()
        };
        assert_eq!(apply_filters(store.records(), &with_cleared).len(), 3);
    }

    #[test]
    fn meetings_share_the_same_predicates() {
        let project = Uuid::new_v4();
        let meetings = vec![
            MeetingMetadata::new(
                project,
                crate::domain::meetings::meeting::MeetingFields {
                    date: ymd(2024, 4, 2),
                    minute_number: "ATA-001".into(),
                    participant: "Ana".into(),
                    supplier: "Acme Engenharia".into(),
                    discipline: "Civil".into(),
                },
            ),
            MeetingMetadata::new(
                project,
                crate::domain::meetings::meeting::MeetingFields {
                    date: ymd(2024, 5, 9),
                    minute_number: "ATA-002".into(),
                    participant: "Carla".into(),
                    supplier: "Volt Ltda".into(),
                    discipline: "Elétrica".into(),
                },
            ),
        ];
        let criteria = FilterCriteria::default()
            .with_text(TextField::Supplier, "acme")
            .with_dates(DateField::MeetingDate, ymd(2024, 4, 2), ymd(2024, 4, 2));
        let out = apply_filters(&meetings, &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].minute_number, "ATA-001");

        let by_title = FilterCriteria::default().with_text(TextField::Title, "x");
        assert!(apply_filters(&meetings, &by_title).is_empty());

        assert_eq!(apply_filters(&meetings, &FilterCriteria::default()).len(), 2);
    }
}
