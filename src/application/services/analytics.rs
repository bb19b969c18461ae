//! Click analytics bucketed by calendar day.
//!
//! Two query shapes are supported:
//!
//! - per mapping, over an inclusive `[start, end]` timestamp range
//! - per owner, over whole calendar days `start..=end`, summed across all of
//!   the owner's mappings
//!
//! Calendar dates are taken in a fixed reference offset (UTC by default).
//! Results are sparse: days without clicks are not emitted.
//!
//! The two queries treat their bounds differently. The per-owner query widens
//! to `[start 00:00, end+1 00:00)` while the per-mapping query filters on the
//! raw timestamps.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use serde_json::json;

use crate::domain::entities::{ClickEvent, DailyClicks};
use crate::domain::repositories::{ClickRepository, MappingRepository};
use crate::error::AppError;

/// Answers per-mapping and per-owner click histograms.
pub struct AnalyticsAggregator<M, C>
where
    M: MappingRepository + ?Sized,
    C: ClickRepository + ?Sized,
{
    mappings: Arc<M>,
    clicks: Arc<C>,
    offset: FixedOffset,
}

impl<M, C> AnalyticsAggregator<M, C>
where
    M: MappingRepository + ?Sized,
    C: ClickRepository + ?Sized,
{
    /// Creates an aggregator that buckets by UTC date.
    pub fn new(mappings: Arc<M>, clicks: Arc<C>) -> Self {
        Self::with_offset(mappings, clicks, Utc.fix())
    }

    /// Creates an aggregator that buckets by date in `offset`.
    pub fn with_offset(mappings: Arc<M>, clicks: Arc<C>, offset: FixedOffset) -> Self {
        Self {
            mappings,
            clicks,
            offset,
        }
    }

    /// Daily click counts for one mapping between two local timestamps.
    ///
    /// Both bounds are inclusive and read as wall-clock time in the reference
    /// offset. Entries are ordered by date and appear only for dates with at
    /// least one click.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(days))` if the mapping exists
    /// - `Ok(None)` if no mapping uses `short_code`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRange`] if `start > end`; the store is not queried.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    pub async fn by_mapping_and_range(
        &self,
        short_code: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Option<Vec<DailyClicks>>, AppError> {
        if start > end {
            return Err(AppError::invalid_range(
                "Start must not be after end",
                json!({ "start": start.to_string(), "end": end.to_string() }),
            ));
        }

        let from = self.to_utc(start)?;
        let to = self.to_utc(end)?;

        let Some(mapping) = self.mappings.find_by_code(short_code).await? else {
            return Ok(None);
        };

        let events = self.clicks.clicks_between(mapping.id, from, to).await?;

        let days = self
            .bucket_by_date(&events)
            .into_iter()
            .map(|(date, count)| DailyClicks { date, count })
            .collect();

        Ok(Some(days))
    }

    /// Total daily clicks across every mapping owned by `owner_id`.
    ///
    /// Covers the whole of each calendar day from `start` through `end`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRange`] if `start > end`; the store is not queried.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    pub async fn by_owner_and_range(
        &self,
        owner_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, i64>, AppError> {
        if start > end {
            return Err(AppError::invalid_range(
                "Start date must not be after end date",
                json!({ "start": start.to_string(), "end": end.to_string() }),
            ));
        }

        let day_after_end = end.succ_opt().ok_or_else(|| {
            AppError::invalid_range("End date is out of range", json!({ "end": end.to_string() }))
        })?;

        let from = self.to_utc(start.and_time(NaiveTime::MIN))?;
        let until = self.to_utc(day_after_end.and_time(NaiveTime::MIN))?;

        let events = self.clicks.clicks_for_owner(owner_id, from, until).await?;

        Ok(self.bucket_by_date(&events))
    }

    /// Counts events per local calendar date.
    fn bucket_by_date(&self, events: &[ClickEvent]) -> BTreeMap<NaiveDate, i64> {
        let mut buckets = BTreeMap::new();

        for event in events {
            let date = event.occurred_at.with_timezone(&self.offset).date_naive();
            *buckets.entry(date).or_insert(0) += 1;
        }

        buckets
    }

    /// Interprets a wall-clock time in the reference offset.
    fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, AppError> {
        self.offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                AppError::invalid_range(
                    "Timestamp is out of range",
                    json!({ "value": local.to_string() }),
                )
            })
    }
}
