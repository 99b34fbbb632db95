//! Application layer implementing the shortening rules.
//!
//! Services consume the repository traits from [`crate::domain`] and expose an
//! API for the HTTP handlers and the admin CLI.
//!
//! - [`services::ShortenerService`] - create, update, delete and resolve mappings
//! - [`error::ShortenerError`] - the error kinds those operations report

pub mod error;
pub mod services;

pub use error::ShortenerError;
