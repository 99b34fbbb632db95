//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /shorten`.
///
/// Only presence is checked here. Scheme and host rules are enforced by the
/// shortener so the CLI and the API reject the same inputs.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
}

/// Response for a created (or already existing) short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub original_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_fails_validation() {
        let request: ShortenRequest = serde_json::from_str("{}").unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn test_present_url_passes_validation() {
        let request: ShortenRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();

        assert!(request.validate().is_ok());
    }
}
