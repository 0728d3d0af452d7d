use std::collections::BTreeMap;

use chrono::Datelike;

use crate::domain::documents::document::DocumentRecord;
use crate::domain::documents::status::DocumentStatus;
use crate::domain::documents::summary::{StatusDistribution, TimelinePoint};

/// Count per status over the non-cleared records, in canonical status order.
/// Statuses with no records are omitted.
pub fn status_distribution<'a, I>(records: I) -> Vec<StatusDistribution>
where
    I: IntoIterator<Item = &'a DocumentRecord>,
{
    let mut counts = [0usize; DocumentStatus::ALL.len()];
    for record in records.into_iter().filter(|r| !r.is_cleared) {
        counts[record.status as usize] += 1;
    }
    let total: usize = counts.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    DocumentStatus::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(status, count)| StatusDistribution {
            status: *status,
            label: status.label().to_string(),
            count,
            percentage: round_one_decimal(count as f64 * 100.0 / total as f64),
        })
        .collect()
}

/// Sparse monthly activity, oldest month first.
pub fn timeline<'a, I>(records: I) -> Vec<TimelinePoint>
where
    I: IntoIterator<Item = &'a DocumentRecord>,
{
    let mut buckets: BTreeMap<(i32, u32), (usize, usize)> = BTreeMap::new();
    for record in records.into_iter().filter(|r| !r.is_cleared) {
        let created = record.created_at.date_naive();
        buckets
            .entry((created.year(), created.month()))
            .or_default()
            .0 += 1;
        if record.status == DocumentStatus::Finished {
            if let Some(end) = record.end_date {
                buckets.entry((end.year(), end.month())).or_default().1 += 1;
            }
        }
    }
    buckets
        .into_iter()
        .map(|((year, month), (created, finished))| TimelinePoint {
            month: format!("{year:04}-{month:02}"),
            created,
            finished,
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
