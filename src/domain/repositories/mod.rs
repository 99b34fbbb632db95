//! Repository trait definitions for the domain layer.
//!
//! These traits abstract mapping storage following the Repository pattern.
//! Concrete stores live in `crate::infrastructure::persistence`; a mock of
//! [`MappingRepository`] is generated via `mockall` for unit tests.
//!
//! # Testing
//!
//! See integration tests in `tests/repository_mapping.rs` for usage examples.

pub mod mapping_repository;

pub use mapping_repository::{MappingCatalog, MappingRepository, StoreError};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
