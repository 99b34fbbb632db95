//! Helpers shared across layers.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Acceptance rules for long URLs

pub mod code_generator;
pub mod url_validator;
