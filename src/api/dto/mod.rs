//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies derive `Deserialize` and `Validate`; responses derive
//! `Serialize` only.

pub mod health;
pub mod message;
pub mod shorten;
pub mod update;
