//! CORS policy for browser clients.
//!
//! Only local origins are allowed: `null` (pages opened from disk),
//! `http://localhost:*` and `http://127.0.0.1:*`.

use axum::http::{HeaderValue, Method, header, request::Parts};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(is_allowed_origin))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

fn is_allowed_origin(origin: &HeaderValue, _parts: &Parts) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };

    origin == "null"
        || is_local_origin(origin, "http://localhost")
        || is_local_origin(origin, "http://127.0.0.1")
}

/// Matches `host` exactly or `host:<port>`.
fn is_local_origin(origin: &str, host: &str) -> bool {
    match origin.strip_prefix(host) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(':')
            .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}
