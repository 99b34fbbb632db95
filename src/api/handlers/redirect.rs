//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look the code up in the redirect cache
/// 2. On a miss, resolve it through the shortener
/// 3. Fill the cache, then re-read the store and evict the entry if the
///    mapping changed in the meantime
/// 4. Return **302 Found** with a `Location` header
///
/// A cache error is logged and treated as a miss.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = match state.cache.get(&code).await {
        Ok(Some(cached)) => {
            debug!(short_code = %code, "Cache HIT");
            cached
        }
        Ok(None) => {
            debug!(short_code = %code, "Cache MISS");
            resolve_and_fill(&state, &code).await?
        }
        Err(e) => {
            warn!(error = %e, short_code = %code, "Cache lookup failed, falling back to store");
            state.shortener.resolve(&code).await?
        }
    };

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]))
}

/// Resolves a cache miss and stores the result.
///
/// An update or delete that lands between the lookup and the fill evicts
/// before our put, so the stored value is checked against the store once
/// more and dropped if it no longer matches.
async fn resolve_and_fill(state: &AppState, code: &str) -> Result<String, AppError> {
    let long_url = state.shortener.resolve(code).await?;

    if let Err(e) = state.cache.put(code, &long_url).await {
        warn!(error = %e, short_code = %code, "Failed to cache redirect");
        return Ok(long_url);
    }

    let still_current = matches!(
        state.shortener.resolve(code).await,
        Ok(ref current) if *current == long_url
    );
    if !still_current {
        debug!(short_code = %code, "Mapping changed during cache fill, evicting");
        if let Err(e) = state.cache.evict(code).await {
            warn!(error = %e, short_code = %code, "Failed to evict stale redirect");
        }
    }

    Ok(long_url)
}
