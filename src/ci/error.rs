//! CI provider API error type.

use thiserror::Error;

/// An error from a CI provider API call.
#[derive(Debug, Error)]
pub enum CiApiError {
    /// The HTTP request failed or returned a non-success status.
    #[error("CI API request failed: {0}")]
    Http(#[from] reqwest::Error),
}
