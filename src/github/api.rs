//! The GitHub operations the monitor performs, as a trait.
//!
//! The pipeline is written against this seam rather than octocrab
//! directly, so tests can substitute a recording fake and assert which
//! calls were (and were not) issued.

use std::future::Future;

use crate::types::{PrNumber, PullRequest};

use super::error::GitHubApiError;

/// GitHub REST operations used by one monitor invocation.
///
/// Implementations are scoped to a repository at construction, so
/// operations don't carry repo coordinates.
pub trait GitHubApi {
    /// Lists all open pull requests in the repository, in API order.
    fn list_open_prs(
        &self,
    ) -> impl Future<Output = Result<Vec<PullRequest>, GitHubApiError>> + Send;

    /// Posts an issue comment on a pull request.
    fn create_comment(
        &self,
        pr: PrNumber,
        body: &str,
    ) -> impl Future<Output = Result<(), GitHubApiError>> + Send;

    /// Adds labels to a pull request.
    fn add_labels(
        &self,
        pr: PrNumber,
        labels: &[String],
    ) -> impl Future<Output = Result<(), GitHubApiError>> + Send;

    /// Fetches a file from the repository's default branch.
    ///
    /// Returns `Ok(None)` when the path exists but has no decodable
    /// content; a missing file surfaces as `Err` from the API layer and
    /// is the caller's decision to tolerate.
    fn repo_file(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Option<String>, GitHubApiError>> + Send;
}
