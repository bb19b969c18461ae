//! DTOs for analytics endpoints.

use serde::Deserialize;

/// `startDate`/`endDate` query pair.
///
/// Kept as raw strings so that malformed values produce the JSON error
/// envelope instead of a bare extractor rejection. The per-mapping endpoint
/// expects `YYYY-MM-DDTHH:MM:SS`, the per-owner endpoint `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: String,
    pub end_date: String,
}
