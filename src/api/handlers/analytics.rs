//! Handlers for click analytics.

use std::collections::BTreeMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use crate::api::dto::analytics::DateRangeQuery;
use crate::domain::entities::{Account, DailyClicks};
use crate::error::AppError;
use crate::state::AppState;

/// Daily click counts for one short code.
///
/// # Endpoint
///
/// `GET /api/urls/analytics/{code}?startDate=2024-05-01T00:00:00&endDate=2024-05-07T23:59:59`
///
/// Both bounds are inclusive. Days without clicks are omitted.
///
/// # Response
///
/// ```json
/// [
///   { "clickDate": "2024-05-02", "count": 3 },
///   { "clickDate": "2024-05-05", "count": 1 }
/// ]
/// ```
///
/// # Errors
///
/// - 400 if a bound is malformed or `startDate` is after `endDate`
/// - 404 if the code is unknown
pub async fn mapping_analytics_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<DailyClicks>>, AppError> {
    let start = parse_date_time("startDate", &range.start_date)?;
    let end = parse_date_time("endDate", &range.end_date)?;

    let days = state
        .analytics
        .by_mapping_and_range(&code, start, end)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

    Ok(Json(days))
}

/// Daily click totals across every mapping of the authenticated account.
///
/// # Endpoint
///
/// `GET /api/urls/totalClicks?startDate=2024-05-01&endDate=2024-05-07`
///
/// Whole calendar days from `startDate` through `endDate` are counted.
///
/// # Response
///
/// ```json
/// { "2024-05-02": 4, "2024-05-05": 1 }
/// ```
pub async fn total_clicks_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<BTreeMap<NaiveDate, i64>>, AppError> {
    let start = parse_date("startDate", &range.start_date)?;
    let end = parse_date("endDate", &range.end_date)?;

    let totals = state
        .analytics
        .by_owner_and_range(account.id, start, end)
        .await?;

    Ok(Json(totals))
}

fn parse_date_time(field: &str, value: &str) -> Result<NaiveDateTime, AppError> {
    value.parse().map_err(|_| {
        AppError::bad_request(
            format!("{field} must be an ISO-8601 date-time (YYYY-MM-DDTHH:MM:SS)"),
            json!({ "field": field, "value": value }),
        )
    })
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    value.parse().map_err(|_| {
        AppError::bad_request(
            format!("{field} must be an ISO-8601 date (YYYY-MM-DD)"),
            json!({ "field": field, "value": value }),
        )
    })
}
