//! Per-pull-request notification dispatch.
//!
//! Every matched pull request gets one comment and one label, with
//! failure isolation: a failed call on one PR never stops the calls for
//! the remaining PRs, and a failed comment does not skip the label.
//! Outcomes are collected for aggregate reporting instead of being
//! propagated mid-loop.

use tracing::warn;

use crate::github::{GitHubApi, GitHubApiError};
use crate::types::{PrNumber, PullRequest};

/// The result of notifying one pull request.
#[derive(Debug)]
pub struct NotifyOutcome {
    /// The pull request that was notified.
    pub pr: PrNumber,

    /// Result of the comment-create call.
    pub comment: Result<(), GitHubApiError>,

    /// Result of the add-labels call.
    pub label: Result<(), GitHubApiError>,
}

impl NotifyOutcome {
    /// True when both calls succeeded.
    pub fn succeeded(&self) -> bool {
        self.comment.is_ok() && self.label.is_ok()
    }
}

/// Posts the comment and applies the label on every pull request.
///
/// Calls are awaited sequentially in listing order. The two calls per
/// PR are independent and non-transactional; partial failure is
/// recorded in the outcome, not rolled back.
pub async fn notify_all<G: GitHubApi>(
    github: &G,
    prs: &[PullRequest],
    body: &str,
    label: &str,
) -> Vec<NotifyOutcome> {
    let labels = vec![label.to_string()];
    let mut outcomes = Vec::with_capacity(prs.len());

    for pr in prs {
        let comment = github.create_comment(pr.number, body).await;
        if let Err(e) = &comment {
            warn!(pr = %pr.number, error = %e, "failed to post failing-CI comment");
        }

        let label_result = github.add_labels(pr.number, &labels).await;
        if let Err(e) = &label_result {
            warn!(pr = %pr.number, error = %e, "failed to add failing-CI label");
        }

        outcomes.push(NotifyOutcome {
            pr: pr.number,
            comment,
            label: label_result,
        });
    }

    outcomes
}
