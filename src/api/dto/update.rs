//! DTO for the update endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request body for `PUT /update/{code}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "New URL is required"))]
    pub new_url: String,
}
