//! Pull-request resolution for a failing commit.
//!
//! The status payload carries every branch whose head GitHub associates
//! with the commit. The failing branch is the one whose recorded head
//! SHA equals the failing commit's SHA; the affected pull requests are
//! the open ones whose source branch is that branch.

use crate::types::PullRequest;
use crate::webhooks::{BranchRef, StatusEvent};

/// Finds the branch whose recorded head commit is the failing commit.
///
/// `None` means the event's branch list does not cover the commit
/// (e.g. the branch was deleted between build and delivery). Callers
/// treat that as a skip, not an error.
pub fn find_matching_branch(event: &StatusEvent) -> Option<&BranchRef> {
    event
        .branches
        .iter()
        .find(|branch| branch.sha == event.commit.sha)
}

/// Keeps the pull requests whose head ref is the given branch.
///
/// Order follows the listing call. An empty result is normal: a branch
/// can fail CI without any open PR built from it.
pub fn matching_pull_requests(branch: &BranchRef, prs: Vec<PullRequest>) -> Vec<PullRequest> {
    prs.into_iter()
        .filter(|pr| pr.head_ref == branch.name)
        .collect()
}
