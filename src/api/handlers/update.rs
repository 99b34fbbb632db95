//! Handler for repointing an existing short code.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::message::MessageResponse;
use crate::api::dto::update::UpdateRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Replaces the long URL behind `code`.
///
/// # Endpoint
///
/// `PUT /update/{code}` with body `{"new_url": "https://..."}`
///
/// The cached redirect for `code` is evicted so the next hit reads the new
/// destination.
///
/// # Errors
///
/// - **400** if the body is malformed or `new_url` is missing or invalid
/// - **404** if `code` does not exist
pub async fn update_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    state
        .shortener
        .update_long_url(&code, &payload.new_url)
        .await?;

    if let Err(e) = state.cache.evict(&code).await {
        tracing::warn!(error = %e, short_code = %code, "Failed to evict cache after update");
    }

    Ok(Json(MessageResponse::new("URL updated successfully")))
}
