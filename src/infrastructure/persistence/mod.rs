//! Mapping store implementations.
//!
//! # Repositories
//!
//! - [`SqliteMappingRepository`] - durable storage via SQLx on SQLite
//! - [`InMemoryMappingRepository`] - process-local storage for tests and ephemeral runs
//!
//! [`pool`] opens the SQLite pool and applies migrations; [`db_error`]
//! classifies driver errors into [`crate::domain::repositories::StoreError`].

pub mod db_error;
pub mod memory_mapping_repository;
pub mod pool;
pub mod sqlite_mapping_repository;

pub use memory_mapping_repository::InMemoryMappingRepository;
pub use pool::PoolSettings;
pub use sqlite_mapping_repository::SqliteMappingRepository;
