//! URL mapping entity.

use chrono::{DateTime, Utc};

/// A persisted mapping from a short code to its long URL.
///
/// `short_code` is unique across all live mappings. `long_url` is not: an
/// update may point several codes at the same destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(id: i64, short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            short_code,
            long_url,
            created_at,
        }
    }
}
