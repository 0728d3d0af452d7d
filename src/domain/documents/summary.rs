use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::documents::status::DocumentStatus;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusDistribution {
    pub status: DocumentStatus,
    pub label: String,
    pub count: usize,
    /// Share of non-cleared records, rounded to one decimal place.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// `YYYY-MM`
    pub month: String,
    pub created: usize,
    pub finished: usize,
}
