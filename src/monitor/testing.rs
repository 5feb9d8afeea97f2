//! In-memory fakes for the GitHub and CI seams, used across the
//! monitor's tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::ci::{Build, BuildApi, BuildRef, CiApiError, LogEntry};
use crate::github::{GitHubApi, GitHubApiError};
use crate::types::{PrNumber, PullRequest, RepoId, Sha};
use crate::webhooks::{BranchRef, CommitRef, StatusEvent, StatusState};

/// A `GitHubApi` fake that serves canned data and records mutations.
#[derive(Default)]
pub(crate) struct RecordingGitHub {
    prs: Vec<PullRequest>,
    config_yaml: Option<String>,
    fail_comments: Vec<PrNumber>,
    list_calls: AtomicUsize,
    comments: Mutex<Vec<(PrNumber, String)>>,
    labels: Mutex<Vec<(PrNumber, Vec<String>)>>,
}

impl RecordingGitHub {
    pub fn with_open_prs(mut self, prs: Vec<PullRequest>) -> Self {
        self.prs = prs;
        self
    }

    pub fn with_config(mut self, yaml: &str) -> Self {
        self.config_yaml = Some(yaml.to_string());
        self
    }

    pub fn failing_comments_for(mut self, prs: impl IntoIterator<Item = PrNumber>) -> Self {
        self.fail_comments = prs.into_iter().collect();
        self
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn comments(&self) -> Vec<(PrNumber, String)> {
        self.comments.lock().unwrap().clone()
    }

    pub fn labels(&self) -> Vec<(PrNumber, Vec<String>)> {
        self.labels.lock().unwrap().clone()
    }
}

impl GitHubApi for RecordingGitHub {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>, GitHubApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.prs.clone())
    }

    async fn create_comment(&self, pr: PrNumber, body: &str) -> Result<(), GitHubApiError> {
        if self.fail_comments.contains(&pr) {
            return Err(GitHubApiError::new("synthetic comment failure"));
        }
        self.comments.lock().unwrap().push((pr, body.to_string()));
        Ok(())
    }

    async fn add_labels(&self, pr: PrNumber, labels: &[String]) -> Result<(), GitHubApiError> {
        self.labels.lock().unwrap().push((pr, labels.to_vec()));
        Ok(())
    }

    async fn repo_file(&self, _path: &str) -> Result<Option<String>, GitHubApiError> {
        match &self.config_yaml {
            Some(yaml) => Ok(Some(yaml.clone())),
            None => Err(GitHubApiError::new("404: file not found")),
        }
    }
}

/// A `BuildApi` fake serving fixed JSON responses.
pub(crate) struct StaticCi {
    build_json: &'static str,
    output_json: &'static str,
    build_calls: AtomicUsize,
}

impl StaticCi {
    pub fn new(build_json: &'static str, output_json: &'static str) -> Self {
        StaticCi {
            build_json,
            output_json,
            build_calls: AtomicUsize::new(0),
        }
    }

    /// A CI fake whose one build has one failed action with output.
    pub fn with_failed_build() -> Self {
        StaticCi::new(
            r#"{ "steps": [ { "actions": [ { "failed": true, "output_url": "https://logs.example.com/1" } ] } ] }"#,
            r#"[ { "message": "npm ERR! build " }, { "message": "failed" } ]"#,
        )
    }

    pub fn build_call_count(&self) -> usize {
        self.build_calls.load(Ordering::SeqCst)
    }
}

impl BuildApi for StaticCi {
    async fn build(&self, _build: &BuildRef) -> Result<Build, CiApiError> {
        self.build_calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::from_str(self.build_json).unwrap())
    }

    async fn action_output(&self, _output_url: &str) -> Result<Vec<LogEntry>, CiApiError> {
        Ok(serde_json::from_str(self.output_json).unwrap())
    }
}

/// A failure status event for `org/repo` with the given branch list.
pub(crate) fn failure_event(
    target_url: Option<&str>,
    commit_sha: &str,
    branches: Vec<(&str, &str)>,
) -> StatusEvent {
    StatusEvent {
        repo: RepoId::new("org", "repo"),
        state: StatusState::Failure,
        name: "org/repo".to_string(),
        context: "ci/circleci".to_string(),
        target_url: target_url.map(str::to_string),
        commit: CommitRef {
            sha: Sha::new(commit_sha),
            html_url: format!("https://github.com/org/repo/commit/{commit_sha}"),
        },
        branches: branches
            .into_iter()
            .map(|(name, sha)| BranchRef {
                name: name.to_string(),
                sha: Sha::new(sha),
            })
            .collect(),
    }
}
