//! HTTP request handlers for API endpoints.
//!
//! Handlers stay thin: decode, call [`crate::application::services::ShortenerService`],
//! keep the redirect cache coherent, encode.

pub mod delete;
pub mod health;
pub mod index;
pub mod redirect;
pub mod shorten;
pub mod update;

pub use delete::delete_handler;
pub use health::health_handler;
pub use index::index_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use update::update_handler;
