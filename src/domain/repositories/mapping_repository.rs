//! Repository traits for URL mapping storage.

use crate::domain::entities::UrlMapping;
use async_trait::async_trait;

/// Errors reported by a mapping store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No mapping exists for the requested short code, or an update/delete
    /// affected zero rows.
    #[error("mapping not found")]
    NotFound,

    /// The store rejected an insert because the short code is already taken.
    #[error("short code already exists")]
    DuplicateShortCode,

    /// Any other backend failure (I/O, pool exhaustion, corrupt data).
    #[error("storage backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps an arbitrary backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Durable mapping store consumed by the shortening orchestrator.
///
/// The store enforces uniqueness of `short_code` only. Deduplication by
/// `long_url` is the caller's job.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteMappingRepository`] - SQLite implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists a new mapping and returns its row id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateShortCode`] if `short_code` is taken.
    /// Returns [`StoreError::Backend`] on storage failures.
    async fn save_mapping(&self, short_code: &str, long_url: &str) -> Result<i64, StoreError>;

    /// Returns the long URL stored for `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no mapping exists.
    /// Returns [`StoreError::Backend`] on storage failures.
    async fn find_by_short_code(&self, short_code: &str) -> Result<String, StoreError>;

    /// Returns a short code already mapped to `long_url`, if any.
    ///
    /// Absence is `Ok(None)`, not an error.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<String>, StoreError>;

    /// Points an existing `short_code` at `new_long_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if zero rows were affected.
    async fn update_long_url(&self, short_code: &str, new_long_url: &str)
    -> Result<(), StoreError>;

    /// Removes the mapping for `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if zero rows were affected.
    async fn delete_mapping(&self, short_code: &str) -> Result<(), StoreError>;
}

/// Read-only inspection of stored mappings.
///
/// Used by the health endpoint and the admin CLI; the orchestrator never
/// depends on it.
#[async_trait]
pub trait MappingCatalog: Send + Sync {
    /// Returns the full mapping record for `short_code`, if it exists.
    async fn find_mapping(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Lists mappings, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<UrlMapping>, StoreError>;

    /// Counts stored mappings.
    async fn count(&self) -> Result<i64, StoreError>;
}
