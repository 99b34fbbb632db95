//! # Shortcode Service
//!
//! A URL shortening service built with Axum and SQLite. Long URLs are mapped
//! to short random codes that redirect back to them.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The mapping entity and storage traits
//! - **Application Layer** ([`application`]) - Shortening rules: validation,
//!   deduplication and collision-safe code generation
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite and in-memory stores, redirect cache
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random 7-character URL-safe codes with a bounded collision retry budget
//! - Idempotent creation: shortening the same URL twice returns the same code
//! - Optional Redis cache for redirects
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: defaults to ./data/shortener.db
//! export DATABASE_URL="sqlite://./data/shortener.db"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! # Start the service (migrations run on startup)
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::ShortenerError;
    pub use crate::application::services::{Shortened, ShortenerService, ShortenerSettings};
    pub use crate::domain::entities::UrlMapping;
    pub use crate::domain::repositories::{MappingCatalog, MappingRepository, StoreError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
