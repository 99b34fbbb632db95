//! Core domain entities.
//!
//! The service has a single entity, [`UrlMapping`], created by the shortening
//! orchestrator, mutated only by explicit updates of its long URL and removed
//! only by explicit deletes. Mappings never expire.

pub mod mapping;

pub use mapping::UrlMapping;
