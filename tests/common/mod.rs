#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use shortcode_service::application::services::{ShortenerService, ShortenerSettings};
use shortcode_service::infrastructure::cache::{CacheError, CacheResult, CacheService, NullCache};
use shortcode_service::infrastructure::persistence::{SqliteMappingRepository, pool};
use shortcode_service::routes::api_router;
use shortcode_service::state::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://localhost:8080";

/// Fresh in-memory database with the schema applied.
///
/// A single connection that never expires keeps the in-memory database alive
/// for the whole test.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    pool::migrate(&pool).await.unwrap();
    pool
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    create_test_state_with_cache(pool, Arc::new(NullCache::new()))
}

pub fn create_test_state_with_cache(pool: SqlitePool, cache: Arc<dyn CacheService>) -> AppState {
    let repository = Arc::new(SqliteMappingRepository::new(Arc::new(pool)));
    let shortener = Arc::new(ShortenerService::new(
        repository.clone(),
        ShortenerSettings::default(),
    ));

    AppState::new(shortener, repository, cache, BASE_URL)
}

pub async fn create_test_server() -> TestServer {
    let pool = create_test_pool().await;
    TestServer::new(api_router(create_test_state(pool))).unwrap()
}

pub async fn insert_mapping(pool: &SqlitePool, code: &str, url: &str) {
    sqlx::query("INSERT INTO urls (short_code, long_url) VALUES (?1, ?2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_mappings(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Extracts the short code from a `short_url` returned by the API.
pub fn code_from_short_url(short_url: &str) -> String {
    short_url
        .strip_prefix(&format!("{}/", BASE_URL))
        .unwrap()
        .to_string()
}

/// A store write that lands while a redirect is filling the cache.
pub enum ConcurrentWrite {
    Update(String),
    Delete,
}

/// In-process cache that records evictions.
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, String>>,
    evicted: Mutex<Vec<String>>,
    pending_write: Mutex<Option<(SqlitePool, ConcurrentWrite)>>,
    healthy: bool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    /// A cache whose PING and lookups fail.
    pub fn broken() -> Self {
        Self::default()
    }

    pub fn seed(&self, code: &str, url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(code.to_string(), url.to_string());
    }

    pub fn evicted(&self) -> Vec<String> {
        self.evicted.lock().unwrap().clone()
    }

    pub fn cached(&self, code: &str) -> Option<String> {
        self.entries.lock().unwrap().get(code).cloned()
    }

    /// Runs `write` against the store, followed by the eviction the API
    /// handlers perform, just before the next `put` stores its value.
    pub fn write_before_next_put(&self, pool: &SqlitePool, write: ConcurrentWrite) {
        *self.pending_write.lock().unwrap() = Some((pool.clone(), write));
    }
}

#[async_trait]
impl CacheService for RecordingCache {
    async fn get(&self, short_code: &str) -> CacheResult<Option<String>> {
        if !self.healthy {
            return Err(CacheError::Operation("cache is down".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(short_code).cloned())
    }

    async fn put(&self, short_code: &str, long_url: &str) -> CacheResult<()> {
        let pending = self.pending_write.lock().unwrap().take();
        if let Some((pool, write)) = pending {
            match write {
                ConcurrentWrite::Update(new_url) => {
                    sqlx::query("UPDATE urls SET long_url = ?1 WHERE short_code = ?2")
                        .bind(new_url)
                        .bind(short_code)
                        .execute(&pool)
                        .await
                        .unwrap();
                }
                ConcurrentWrite::Delete => {
                    sqlx::query("DELETE FROM urls WHERE short_code = ?1")
                        .bind(short_code)
                        .execute(&pool)
                        .await
                        .unwrap();
                }
            }
            self.evict(short_code).await?;
        }

        self.seed(short_code, long_url);
        Ok(())
    }

    async fn evict(&self, short_code: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(short_code);
        self.evicted.lock().unwrap().push(short_code.to_string());
        Ok(())
    }

    async fn ping(&self) -> bool {
        self.healthy
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
