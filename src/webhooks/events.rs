//! Typed representation of the GitHub `status` webhook event.
//!
//! The monitor reacts to exactly one event type: a commit status change
//! reported through GitHub's (legacy) Status API. CircleCI posts these
//! for every build, with the build URL in `target_url` and the
//! `account/project` pair in `name`.

use crate::types::{RepoId, Sha};

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusState {
    /// Check is still running.
    Pending,
    /// Check succeeded.
    Success,
    /// Check failed.
    Failure,
    /// Check errored.
    Error,
}

impl StatusState {
    /// Returns true for the one state the monitor acts on.
    pub fn is_failure(&self) -> bool {
        matches!(self, StatusState::Failure)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusState::Pending => "pending",
            StatusState::Success => "success",
            StatusState::Failure => "failure",
            StatusState::Error => "error",
        }
    }
}

/// The commit a status event reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    /// The failing commit's SHA.
    pub sha: Sha,

    /// Link to the commit on GitHub, used in the posted comment.
    pub html_url: String,
}

/// A branch listed in the status payload, with its recorded head commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// The branch name.
    pub name: String,

    /// The branch's head commit SHA at delivery time.
    pub sha: Sha,
}

/// A commit status event.
///
/// Carries everything one monitor invocation needs: the repository, the
/// commit and its branch candidates, and the CI coordinates (`name` and
/// `target_url`) used to locate the failing build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    /// The repository the status belongs to.
    pub repo: RepoId,

    /// The state of the status.
    pub state: StatusState,

    /// The `account/project` identifier the CI provider is keyed by.
    ///
    /// For CircleCI statuses this matches the path segment preceding the
    /// build number in `target_url`.
    pub name: String,

    /// The context (check name) of the status, e.g. "ci/circleci".
    pub context: String,

    /// URL of the CI build this status reports, when the provider set one.
    pub target_url: Option<String>,

    /// The commit the status is for.
    pub commit: CommitRef,

    /// All branches whose head the payload associates with this commit.
    pub branches: Vec<BranchRef>,
}
