//! Short URL creation, update, deletion and resolution.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::error::ShortenerError;
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, is_reserved_code};
use crate::utils::url_validator::validate_url;

/// Default number of candidate codes tried per creation request.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Tunables for code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortenerSettings {
    /// Length of generated short codes.
    pub code_length: usize,
    /// Retry budget for finding a free code.
    pub max_attempts: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Outcome of a successful creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortened {
    /// A new mapping was persisted under this code.
    Created(String),
    /// The long URL was already mapped; the existing code is returned.
    Existing(String),
}

impl Shortened {
    pub fn short_code(&self) -> &str {
        match self {
            Self::Created(code) | Self::Existing(code) => code,
        }
    }

    pub fn into_short_code(self) -> String {
        match self {
            Self::Created(code) | Self::Existing(code) => code,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Service that maps long URLs to unique short codes.
///
/// Holds no mutable state. Concurrent requests coordinate only through the
/// store's uniqueness constraint on `short_code`.
pub struct ShortenerService {
    repository: Arc<dyn MappingRepository>,
    settings: ShortenerSettings,
}

impl ShortenerService {
    /// Creates a new shortener service.
    pub fn new(repository: Arc<dyn MappingRepository>, settings: ShortenerSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Returns a short code for `long_url`, creating a mapping if needed.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL (no store access on failure)
    /// 2. Return the existing code if the URL is already mapped
    /// 3. Generate candidates until one is free and persisted, up to
    ///    `max_attempts` times
    ///
    /// A candidate is a collision when the lookup finds it, when it is a
    /// reserved route segment, or when the insert hits the unique constraint
    /// because a concurrent request took it after the lookup.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::InvalidUrl`] if the URL is rejected
    /// - [`ShortenerError::Storage`] if a lookup or insert fails
    /// - [`ShortenerError::ExhaustedRetries`] if every candidate collided
    /// - [`ShortenerError::Generation`] if the entropy source fails
    pub async fn create_short_url(&self, long_url: &str) -> Result<Shortened, ShortenerError> {
        validate_url(long_url).map_err(|reason| ShortenerError::invalid_url(long_url, reason))?;

        let existing = self
            .repository
            .find_by_long_url(long_url)
            .await
            .map_err(|e| {
                error!(long_url, error = %e, "Failed to check for an existing mapping");
                ShortenerError::Storage(e)
            })?;

        if let Some(short_code) = existing {
            info!(short_code = %short_code, long_url, "Returning existing mapping");
            metrics::counter!("shortener_dedup_hits_total").increment(1);
            return Ok(Shortened::Existing(short_code));
        }

        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let candidate = generate_code(self.settings.code_length)?;

            if is_reserved_code(&candidate) {
                debug!(candidate = %candidate, attempt, "Generated a reserved code, retrying");
                continue;
            }

            match self.repository.find_by_short_code(&candidate).await {
                Ok(_) => {
                    warn!(
                        candidate = %candidate,
                        attempt,
                        max_attempts,
                        "Short code collision, retrying"
                    );
                    metrics::counter!("shortener_code_collisions_total").increment(1);
                    continue;
                }
                Err(StoreError::NotFound) => {}
                Err(e) => {
                    error!(
                        candidate = %candidate,
                        error = %e,
                        "Failed to check short code uniqueness"
                    );
                    return Err(ShortenerError::Storage(e));
                }
            }

            match self.repository.save_mapping(&candidate, long_url).await {
                Ok(id) => {
                    info!(id, short_code = %candidate, long_url, "Created mapping");
                    metrics::counter!("shortener_mappings_created_total").increment(1);
                    return Ok(Shortened::Created(candidate));
                }
                Err(StoreError::DuplicateShortCode) => {
                    warn!(
                        candidate = %candidate,
                        attempt,
                        max_attempts,
                        "Short code taken concurrently, retrying"
                    );
                    metrics::counter!("shortener_code_collisions_total").increment(1);
                }
                Err(e) => {
                    error!(candidate = %candidate, error = %e, "Failed to save mapping");
                    return Err(ShortenerError::Storage(e));
                }
            }
        }

        error!(
            attempts = max_attempts,
            long_url, "Could not generate a unique short code"
        );
        metrics::counter!("shortener_retries_exhausted_total").increment(1);

        Err(ShortenerError::ExhaustedRetries {
            attempts: max_attempts,
        })
    }

    /// Points `short_code` at `new_long_url`.
    ///
    /// Several codes may end up pointing at the same URL; no deduplication is
    /// performed here.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::InvalidUrl`] if the new URL is rejected
    /// - [`ShortenerError::NotFound`] if no mapping exists for the code
    /// - [`ShortenerError::Storage`] on store failures
    pub async fn update_long_url(
        &self,
        short_code: &str,
        new_long_url: &str,
    ) -> Result<(), ShortenerError> {
        validate_url(new_long_url)
            .map_err(|reason| ShortenerError::invalid_url(new_long_url, reason))?;

        self.repository
            .update_long_url(short_code, new_long_url)
            .await
            .map_err(|e| {
                log_store_failure("update", short_code, &e);
                ShortenerError::from_store(short_code, e)
            })?;

        info!(short_code, new_long_url, "Updated mapping");
        Ok(())
    }

    /// Removes the mapping for `short_code`.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::NotFound`] if no mapping exists for the code
    /// - [`ShortenerError::Storage`] on store failures
    pub async fn delete_mapping(&self, short_code: &str) -> Result<(), ShortenerError> {
        self.repository
            .delete_mapping(short_code)
            .await
            .map_err(|e| {
                log_store_failure("delete", short_code, &e);
                ShortenerError::from_store(short_code, e)
            })?;

        info!(short_code, "Deleted mapping");
        Ok(())
    }

    /// Returns the long URL for `short_code`.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::NotFound`] if no mapping exists for the code
    /// - [`ShortenerError::Storage`] on store failures
    pub async fn resolve(&self, short_code: &str) -> Result<String, ShortenerError> {
        self.repository
            .find_by_short_code(short_code)
            .await
            .map_err(|e| {
                log_store_failure("resolve", short_code, &e);
                ShortenerError::from_store(short_code, e)
            })
    }
}

fn log_store_failure(operation: &str, short_code: &str, err: &StoreError) {
    match err {
        StoreError::NotFound => debug!(operation, short_code, "Short code not found"),
        other => error!(operation, short_code, error = %other, "Mapping store failure"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MappingCatalog, MockMappingRepository};
    use crate::infrastructure::persistence::InMemoryMappingRepository;
    use std::io;

    fn service(repo: MockMappingRepository) -> ShortenerService {
        ShortenerService::new(Arc::new(repo), ShortenerSettings::default())
    }

    fn backend_error() -> StoreError {
        StoreError::backend(io::Error::other("disk on fire"))
    }

    fn is_url_safe(code: &str) -> bool {
        code.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    #[tokio::test]
    async fn test_create_short_url_success() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url()
            .withf(|url| url == "https://example.com/a")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_find_by_short_code()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));
        repo.expect_save_mapping()
            .withf(|code, url| code.len() == 7 && url == "https://example.com/a")
            .times(1)
            .returning(|_, _| Ok(1));

        let result = service(repo)
            .create_short_url("https://example.com/a")
            .await
            .unwrap();

        assert!(result.is_created());
        assert_eq!(result.short_code().len(), 7);
        assert!(is_url_safe(result.short_code()));
    }

    #[tokio::test]
    async fn test_create_short_url_returns_existing_code() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(Some("Ab3xQ9z".to_string())));
        repo.expect_find_by_short_code().times(0);
        repo.expect_save_mapping().times(0);

        let result = service(repo)
            .create_short_url("https://example.com/a")
            .await
            .unwrap();

        assert_eq!(result, Shortened::Existing("Ab3xQ9z".to_string()));
    }

    #[tokio::test]
    async fn test_create_short_url_invalid_url_touches_no_store() {
        let svc = service(MockMappingRepository::new());

        for input in ["not-a-url", "ftp://example.com", "/relative", "HTTP://x.com", ""] {
            let result = svc.create_short_url(input).await;
            assert!(
                matches!(result, Err(ShortenerError::InvalidUrl { .. })),
                "{} should be rejected",
                input
            );
        }
    }

    #[tokio::test]
    async fn test_create_short_url_retries_after_collision() {
        let mut repo = MockMappingRepository::new();
        let mut lookups = 0;

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_find_by_short_code()
            .times(2)
            .returning(move |_| {
                lookups += 1;
                if lookups == 1 {
                    Ok("https://taken.com".to_string())
                } else {
                    Err(StoreError::NotFound)
                }
            });
        repo.expect_save_mapping().times(1).returning(|_, _| Ok(7));

        let result = service(repo)
            .create_short_url("https://example.com")
            .await
            .unwrap();

        assert!(result.is_created());
    }

    #[tokio::test]
    async fn test_create_short_url_exhausts_retry_budget() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_find_by_short_code()
            .times(5)
            .returning(|_| Ok("https://taken.com".to_string()));
        repo.expect_save_mapping().times(0);

        let result = service(repo).create_short_url("https://example.com").await;

        assert!(matches!(
            result,
            Err(ShortenerError::ExhaustedRetries { attempts: 5 })
        ));
    }

    #[tokio::test]
    async fn test_create_short_url_respects_configured_budget() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_find_by_short_code()
            .times(2)
            .returning(|_| Ok("https://taken.com".to_string()));

        let svc = ShortenerService::new(
            Arc::new(repo),
            ShortenerSettings {
                code_length: 10,
                max_attempts: 2,
            },
        );

        let result = svc.create_short_url("https://example.com").await;

        assert!(matches!(
            result,
            Err(ShortenerError::ExhaustedRetries { attempts: 2 })
        ));
    }

    #[tokio::test]
    async fn test_create_short_url_retries_duplicate_insert() {
        let mut repo = MockMappingRepository::new();
        let mut inserts = 0;

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_find_by_short_code()
            .times(2)
            .returning(|_| Err(StoreError::NotFound));
        repo.expect_save_mapping().times(2).returning(move |_, _| {
            inserts += 1;
            if inserts == 1 {
                Err(StoreError::DuplicateShortCode)
            } else {
                Ok(2)
            }
        });

        let result = service(repo)
            .create_short_url("https://example.com")
            .await
            .unwrap();

        assert!(result.is_created());
    }

    #[tokio::test]
    async fn test_create_short_url_lookup_failure_aborts() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_find_by_short_code()
            .times(1)
            .returning(|_| Err(backend_error()));
        repo.expect_save_mapping().times(0);

        let result = service(repo).create_short_url("https://example.com").await;

        assert!(matches!(result, Err(ShortenerError::Storage(_))));
    }

    #[tokio::test]
    async fn test_create_short_url_save_failure_is_not_retried() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_find_by_short_code()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));
        repo.expect_save_mapping()
            .times(1)
            .returning(|_, _| Err(backend_error()));

        let result = service(repo).create_short_url("https://example.com").await;

        assert!(matches!(result, Err(ShortenerError::Storage(_))));
    }

    #[tokio::test]
    async fn test_create_short_url_reverse_lookup_failure() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Err(backend_error()));
        repo.expect_find_by_short_code().times(0);

        let result = service(repo).create_short_url("https://example.com").await;

        assert!(matches!(result, Err(ShortenerError::Storage(_))));
    }

    #[tokio::test]
    async fn test_update_long_url_success() {
        let mut repo = MockMappingRepository::new();

        repo.expect_update_long_url()
            .withf(|code, url| code == "Ab3xQ9z" && url == "https://example.com/b")
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(repo)
            .update_long_url("Ab3xQ9z", "https://example.com/b")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_long_url_invalid_url() {
        let mut repo = MockMappingRepository::new();
        repo.expect_update_long_url().times(0);

        let result = service(repo)
            .update_long_url("Ab3xQ9z", "javascript:alert(1)")
            .await;

        assert!(matches!(result, Err(ShortenerError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_update_long_url_not_found() {
        let mut repo = MockMappingRepository::new();
        repo.expect_update_long_url()
            .times(1)
            .returning(|_, _| Err(StoreError::NotFound));

        let result = service(repo)
            .update_long_url("missing", "https://example.com")
            .await;

        assert!(matches!(
            result,
            Err(ShortenerError::NotFound { ref short_code }) if short_code == "missing"
        ));
    }

    #[tokio::test]
    async fn test_delete_mapping_not_found() {
        let mut repo = MockMappingRepository::new();
        repo.expect_delete_mapping()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let result = service(repo).delete_mapping("missing").await;

        assert!(matches!(result, Err(ShortenerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_mapping_storage_failure() {
        let mut repo = MockMappingRepository::new();
        repo.expect_delete_mapping()
            .times(1)
            .returning(|_| Err(backend_error()));

        let result = service(repo).delete_mapping("Ab3xQ9z").await;

        assert!(matches!(result, Err(ShortenerError::Storage(_))));
    }

    #[tokio::test]
    async fn test_full_lifecycle_against_in_memory_store() {
        let repo = Arc::new(InMemoryMappingRepository::new());
        let svc = ShortenerService::new(repo.clone(), ShortenerSettings::default());

        let created = svc.create_short_url("https://example.com/a").await.unwrap();
        assert!(created.is_created());
        let code = created.into_short_code();

        let again = svc.create_short_url("https://example.com/a").await.unwrap();
        assert_eq!(again, Shortened::Existing(code.clone()));
        assert_eq!(repo.count().await.unwrap(), 1);

        assert_eq!(svc.resolve(&code).await.unwrap(), "https://example.com/a");

        svc.update_long_url(&code, "https://example.com/b")
            .await
            .unwrap();
        assert_eq!(svc.resolve(&code).await.unwrap(), "https://example.com/b");

        svc.delete_mapping(&code).await.unwrap();
        assert!(matches!(
            svc.resolve(&code).await,
            Err(ShortenerError::NotFound { .. })
        ));
        assert!(matches!(
            svc.delete_mapping(&code).await,
            Err(ShortenerError::NotFound { .. })
        ));
    }
}
