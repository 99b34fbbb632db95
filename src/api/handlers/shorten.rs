//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// **201 Created**, also when the URL was already shortened before; the
/// existing code is returned in that case.
///
/// ```json
/// {
///   "short_url": "http://localhost:8080/aZ3_k9Q",
///   "original_url": "https://example.com/some/long/path"
/// }
/// ```
///
/// # Errors
///
/// - **400** if the body is malformed, `url` is missing, or the URL is not http(s)
/// - **500** on storage failure or when no unique code could be generated
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let outcome = state.shortener.create_short_url(&payload.url).await?;
    let short_url = state.short_url(outcome.short_code());

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url,
            original_url: payload.url,
        }),
    ))
}
