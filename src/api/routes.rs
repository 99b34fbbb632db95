//! API route table.

use crate::api::handlers::{
    delete_handler, health_handler, index_handler, redirect_handler, shorten_handler,
    update_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// All service endpoints.
///
/// # Endpoints
///
/// - `GET    /`              - API description
/// - `GET    /health`        - Database and cache checks
/// - `POST   /shorten`       - Create a short URL
/// - `PUT    /update/{code}` - Repoint a short code
/// - `DELETE /delete/{code}` - Remove a short code
/// - `GET    /{code}`        - Redirect to the long URL
///
/// A new fixed segment must also be added to the reserved codes in
/// [`crate::utils::code_generator`].
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/shorten", post(shorten_handler))
        .route("/update/{code}", put(update_handler))
        .route("/delete/{code}", delete(delete_handler))
        .route("/{code}", get(redirect_handler))
}
