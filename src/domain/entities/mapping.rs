//! Url mapping entity: a short code pointing at an original URL.

use chrono::{DateTime, Utc};

/// Association between a short code and the URL it redirects to.
///
/// `original_url` is stored exactly as submitted. Scheme normalization happens
/// only when a redirect target is built (see
/// [`crate::utils::redirect_target::redirect_target`]).
///
/// `click_count` always equals the number of [`super::ClickEvent`] rows that
/// reference this mapping. Both are changed by a single store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        owner_id: i64,
        created_at: DateTime<Utc>,
        click_count: i64,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            owner_id,
            created_at,
            click_count,
        }
    }

    /// Returns true if `owner_id` owns this mapping.
    pub fn is_owned_by(&self, owner_id: i64) -> bool {
        self.owner_id == owner_id
    }
}

/// Input data for persisting a new mapping.
///
/// The store assigns `id` and `created_at`; `click_count` starts at zero.
#[derive(Debug, Clone)]
pub struct NewMapping {
    pub short_code: String,
    pub original_url: String,
    pub owner_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let now = Utc::now();
        let mapping = UrlMapping::new(
            1,
            "https://go.dev".to_string(),
            "Ab3dEf9h".to_string(),
            7,
            now,
            0,
        );

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.original_url, "https://go.dev");
        assert_eq!(mapping.short_code, "Ab3dEf9h");
        assert_eq!(mapping.created_at, now);
        assert_eq!(mapping.click_count, 0);
        assert!(mapping.is_owned_by(7));
        assert!(!mapping.is_owned_by(8));
    }

    #[test]
    fn test_new_mapping_keeps_url_verbatim() {
        let new_mapping = NewMapping {
            short_code: "zzzzzzzz".to_string(),
            original_url: "example.com/x".to_string(),
            owner_id: 3,
        };

        assert_eq!(new_mapping.original_url, "example.com/x");
        assert_eq!(new_mapping.owner_id, 3);
    }
}
