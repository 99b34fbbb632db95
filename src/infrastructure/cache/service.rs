//! Redirect cache trait and error types.

use async_trait::async_trait;

/// Errors that can occur while talking to a cache backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of `short_code -> long_url` used on the redirect path.
///
/// The mapping store stays authoritative. A cache failure must degrade to a
/// store lookup and never fail the request. Writers evict an entry whenever
/// the mapping for that code changes or disappears.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Looks up the long URL cached for `short_code`.
    ///
    /// Returns `Ok(None)` on a miss.
    async fn get(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Caches `long_url` for `short_code` with the backend's default TTL.
    async fn put(&self, short_code: &str, long_url: &str) -> CacheResult<()>;

    /// Drops any cached entry for `short_code`.
    async fn evict(&self, short_code: &str) -> CacheResult<()>;

    /// Returns true if the backend answers.
    async fn ping(&self) -> bool;

    /// Human-readable backend name for health output.
    fn backend(&self) -> &'static str;
}
