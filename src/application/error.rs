//! Error kinds returned by the shortening orchestrator.

use crate::domain::repositories::StoreError;
use crate::utils::code_generator::GenerationError;
use crate::utils::url_validator::UrlValidationError;

/// Failure of a shortening operation.
///
/// Every variant is distinguishable by the caller without inspecting
/// messages. Underlying causes stay reachable through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum ShortenerError {
    /// The supplied long URL is not an absolute http(s) URL with a host.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        url: String,
        #[source]
        reason: UrlValidationError,
    },

    /// No mapping exists for the short code.
    #[error("short code '{short_code}' not found")]
    NotFound { short_code: String },

    /// The mapping store failed.
    #[error("storage failure")]
    Storage(#[source] StoreError),

    /// Every generated candidate collided with an existing code.
    #[error("could not generate a unique short code after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },

    /// The entropy source failed.
    #[error("short code generation failed")]
    Generation(#[from] GenerationError),
}

impl ShortenerError {
    pub(crate) fn invalid_url(url: &str, reason: UrlValidationError) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason,
        }
    }

    /// Maps a store error for an operation keyed on `short_code`, turning
    /// [`StoreError::NotFound`] into [`ShortenerError::NotFound`].
    pub(crate) fn from_store(short_code: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound {
                short_code: short_code.to_string(),
            },
            other => Self::Storage(other),
        }
    }
}
