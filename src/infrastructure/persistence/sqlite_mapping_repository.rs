//! SQLite implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::{MappingCatalog, MappingRepository, StoreError};

/// Row shape of the `urls` table.
#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    short_code: String,
    long_url: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(row.id, row.short_code, row.long_url, row.created_at)
    }
}

/// SQLite repository for URL mappings.
///
/// All statements are parameterized. Uniqueness of `short_code` is enforced
/// by the `UNIQUE` constraint on the `urls` table.
pub struct SqliteMappingRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for SqliteMappingRepository {
    async fn save_mapping(&self, short_code: &str, long_url: &str) -> Result<i64, StoreError> {
        let result =
            sqlx::query("INSERT INTO urls (short_code, long_url, created_at) VALUES (?1, ?2, ?3)")
                .bind(short_code)
                .bind(long_url)
                .bind(Utc::now())
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<String, StoreError> {
        let long_url: Option<String> =
            sqlx::query_scalar("SELECT long_url FROM urls WHERE short_code = ?1")
                .bind(short_code)
                .fetch_optional(self.pool.as_ref())
                .await?;

        long_url.ok_or(StoreError::NotFound)
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<String>, StoreError> {
        let short_code: Option<String> =
            sqlx::query_scalar("SELECT short_code FROM urls WHERE long_url = ?1 ORDER BY id LIMIT 1")
                .bind(long_url)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(short_code)
    }

    async fn update_long_url(
        &self,
        short_code: &str,
        new_long_url: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE urls SET long_url = ?1 WHERE short_code = ?2")
            .bind(new_long_url)
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn delete_mapping(&self, short_code: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = ?1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl MappingCatalog for SqliteMappingRepository {
    async fn find_mapping(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row: Option<MappingRow> = sqlx::query_as(
            "SELECT id, short_code, long_url, created_at FROM urls WHERE short_code = ?1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<UrlMapping>, StoreError> {
        let rows: Vec<MappingRow> = sqlx::query_as(
            r#"
            SELECT id, short_code, long_url, created_at
            FROM urls
            ORDER BY id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UrlMapping::from).collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
