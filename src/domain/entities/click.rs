//! Click entities: single recorded resolutions and their daily buckets.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// A single recorded resolution of a mapping.
///
/// Events are append-only. They are removed only together with the mapping
/// they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub id: i64,
    pub mapping_id: i64,
    pub occurred_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a new ClickEvent instance.
    pub fn new(id: i64, mapping_id: i64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id,
            mapping_id,
            occurred_at,
        }
    }
}

/// Number of clicks that fell on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyClicks {
    #[serde(rename = "clickDate")]
    pub date: NaiveDate,
    pub count: i64,
}
