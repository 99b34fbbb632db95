//! HTTP middleware layers applied around the router.

pub mod cors;
pub mod tracing;
