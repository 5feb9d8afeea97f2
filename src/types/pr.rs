//! Pull request data as returned by the GitHub list endpoint.

use crate::types::PrNumber;

/// An open pull request.
///
/// Only the fields the monitor needs: the number (to address comments
/// and labels) and the head branch name (to match against the failing
/// commit's branch). Fetched fresh per event, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// The PR number.
    pub number: PrNumber,

    /// The PR's source branch name.
    pub head_ref: String,
}

impl PullRequest {
    pub fn new(number: impl Into<PrNumber>, head_ref: impl Into<String>) -> Self {
        PullRequest {
            number: number.into(),
            head_ref: head_ref.into(),
        }
    }
}
