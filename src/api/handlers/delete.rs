//! Handler for removing a short code.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::AppError;
use crate::state::AppState;

/// Deletes the mapping for `code`.
///
/// # Endpoint
///
/// `DELETE /delete/{code}`
///
/// Returns **204 No Content** on success and **404** if the code is unknown.
pub async fn delete_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.shortener.delete_mapping(&code).await?;

    if let Err(e) = state.cache.evict(&code).await {
        tracing::warn!(error = %e, short_code = %code, "Failed to evict cache after delete");
    }

    Ok(StatusCode::NO_CONTENT)
}
