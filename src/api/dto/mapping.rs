//! DTOs for url mapping endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlMapping;

/// Request to shorten a single URL.
///
/// The URL is stored exactly as given; a missing scheme is only filled in
/// when redirecting.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048, message = "originalUrl must be 1-2048 characters"))]
    pub original_url: String,
}

/// A mapping as shown to its owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMappingResponse {
    pub id: i64,
    pub original_url: String,
    pub short_url: String,
    pub click_count: i64,
    pub created_date: DateTime<Utc>,
    pub username: String,
}

impl UrlMappingResponse {
    pub fn new(mapping: UrlMapping, short_url: String, username: &str) -> Self {
        Self {
            id: mapping.id,
            original_url: mapping.original_url,
            short_url,
            click_count: mapping.click_count,
            created_date: mapping.created_at,
            username: username.to_string(),
        }
    }
}
