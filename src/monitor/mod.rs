//! The failing-status monitor pipeline.
//!
//! One invocation per `status` failure event:
//!
//! 1. resolve the failing branch and the open PRs built from it
//! 2. load the repository configuration (label name)
//! 3. locate the CI build, fetch and sanitize its failure log
//! 4. post a comment and apply the label on every affected PR
//!
//! Two outcomes are deliberately not errors: an event whose branch list
//! doesn't cover the failing commit is skipped, and a branch with no
//! open PR simply has nobody to notify. Per-PR dispatch failures are
//! isolated and aggregated into the report instead of aborting the
//! invocation.

pub mod comment;
pub mod notify;
pub mod resolve;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;
use tracing::debug;

use crate::ci::log::failing_build_log;
use crate::ci::{BuildApi, BuildRef, CiApiError};
use crate::config::RepoConfig;
use crate::github::{GitHubApi, GitHubApiError};
use crate::webhooks::StatusEvent;

pub use notify::NotifyOutcome;

/// A failure that prevented the pipeline from reaching dispatch.
///
/// Failures *during* dispatch are not errors; they are recorded per PR
/// in [`MonitorReport::Notified`].
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    GitHub(#[from] GitHubApiError),

    #[error(transparent)]
    Ci(#[from] CiApiError),
}

/// What one monitor invocation did.
#[derive(Debug)]
pub enum MonitorReport {
    /// No branch in the event matches the failing commit; nothing done.
    NoMatchingBranch,

    /// The branch matched but no open pull request is built from it.
    NoMatchingPullRequests,

    /// Dispatch ran; one outcome per affected pull request.
    Notified(Vec<NotifyOutcome>),
}

impl MonitorReport {
    /// Number of pull requests dispatch was attempted for.
    pub fn attempted(&self) -> usize {
        match self {
            MonitorReport::Notified(outcomes) => outcomes.len(),
            _ => 0,
        }
    }

    /// Number of pull requests where at least one call failed.
    pub fn failed(&self) -> usize {
        match self {
            MonitorReport::Notified(outcomes) => {
                outcomes.iter().filter(|o| !o.succeeded()).count()
            }
            _ => 0,
        }
    }
}

/// Runs the pipeline for one failure event.
pub async fn run<G: GitHubApi, C: BuildApi>(
    event: &StatusEvent,
    github: &G,
    ci: &C,
) -> Result<MonitorReport, MonitorError> {
    let Some(branch) = resolve::find_matching_branch(event) else {
        return Ok(MonitorReport::NoMatchingBranch);
    };
    debug!(branch = %branch.name, "failing commit is the head of branch");

    let open_prs = github.list_open_prs().await?;
    let affected = resolve::matching_pull_requests(branch, open_prs);
    if affected.is_empty() {
        return Ok(MonitorReport::NoMatchingPullRequests);
    }

    let config = RepoConfig::load(github).await;

    let target_url = event.target_url.as_deref().unwrap_or_default();
    let build_ref = BuildRef::from_status(&event.name, target_url);
    if build_ref.is_none() {
        debug!(target_url, "status does not reference a recognizable build");
    }
    let log = failing_build_log(ci, build_ref.as_ref()).await?;

    let body = comment::build_comment(target_url, &event.commit, &log);
    let outcomes = notify::notify_all(github, &affected, &body, config.failed_ci_label()).await;

    Ok(MonitorReport::Notified(outcomes))
}
