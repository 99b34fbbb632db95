//! Handler for the API root.

use axum::Json;

use crate::api::dto::message::MessageResponse;

const API_DESCRIPTION: &str = "URL Shortener API. Use POST /shorten, PUT /update/{code}, DELETE /delete/{code}, or GET /{code}";

/// `GET /` - describes the available endpoints.
pub async fn index_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new(API_DESCRIPTION))
}
