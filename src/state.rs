//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::domain::repositories::MappingCatalog;
use crate::infrastructure::cache::CacheService;

/// Cloned per request by axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    /// Read-only view of stored mappings, used by the health check.
    pub catalog: Arc<dyn MappingCatalog>,
    pub cache: Arc<dyn CacheService>,
    /// Public prefix for short URLs, without a trailing slash.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        shortener: Arc<ShortenerService>,
        catalog: Arc<dyn MappingCatalog>,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            shortener,
            catalog,
            cache,
            base_url,
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }
}
