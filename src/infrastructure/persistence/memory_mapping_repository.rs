//! Process-local mapping store.
//!
//! Holds mappings in a `HashMap` behind a tokio `RwLock`. Inserts check and
//! write under the same write guard, so the short code uniqueness guarantee
//! matches the SQLite store. Contents are lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::{MappingCatalog, MappingRepository, StoreError};

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_code: HashMap<String, UrlMapping>,
}

/// In-memory repository for URL mappings.
#[derive(Default)]
pub struct InMemoryMappingRepository {
    inner: RwLock<Inner>,
}

impl InMemoryMappingRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn save_mapping(&self, short_code: &str, long_url: &str) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.by_code.contains_key(short_code) {
            return Err(StoreError::DuplicateShortCode);
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.by_code.insert(
            short_code.to_string(),
            UrlMapping::new(id, short_code.to_string(), long_url.to_string(), Utc::now()),
        );

        Ok(id)
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<String, StoreError> {
        self.inner
            .read()
            .await
            .by_code
            .get(short_code)
            .map(|mapping| mapping.long_url.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .by_code
            .values()
            .filter(|mapping| mapping.long_url == long_url)
            .min_by_key(|mapping| mapping.id)
            .map(|mapping| mapping.short_code.clone()))
    }

    async fn update_long_url(
        &self,
        short_code: &str,
        new_long_url: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let mapping = inner
            .by_code
            .get_mut(short_code)
            .ok_or(StoreError::NotFound)?;

        mapping.long_url = new_long_url.to_string();
        Ok(())
    }

    async fn delete_mapping(&self, short_code: &str) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .by_code
            .remove(short_code)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl MappingCatalog for InMemoryMappingRepository {
    async fn find_mapping(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        Ok(self.inner.read().await.by_code.get(short_code).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<UrlMapping>, StoreError> {
        let inner = self.inner.read().await;
        let mut mappings: Vec<UrlMapping> = inner.by_code.values().cloned().collect();
        mappings.sort_by(|a, b| b.id.cmp(&a.id));

        Ok(mappings
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.inner.read().await.by_code.len() as i64)
    }
}
