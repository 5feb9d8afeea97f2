//! GitHub API error type.

use thiserror::Error;

/// An error from a GitHub API operation.
///
/// The monitor does not retry; a failed notification call surfaces in
/// the per-PR outcome report instead, so no transient/permanent
/// categorization is kept. The octocrab source is preserved for logs.
#[derive(Debug, Error)]
#[error("GitHub API error: {message}")]
pub struct GitHubApiError {
    /// A human-readable description of the failure.
    pub message: String,

    /// The underlying octocrab error, when there is one.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl GitHubApiError {
    /// Creates an error without an underlying API source.
    pub fn new(message: impl Into<String>) -> Self {
        GitHubApiError {
            message: message.into(),
            source: None,
        }
    }
}

impl From<octocrab::Error> for GitHubApiError {
    fn from(err: octocrab::Error) -> Self {
        GitHubApiError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
