//! Octocrab client wrapper scoped to a specific repository.
//!
//! Webhook events are repo-addressed, so all GitHub operations for one
//! invocation target the same repository. The wrapper carries that
//! scope; the shared `Octocrab` instance is cloned into it per event.

use octocrab::Octocrab;

use crate::types::{PrNumber, PullRequest, RepoId};

use super::api::GitHubApi;
use super::error::GitHubApiError;

/// A GitHub API client scoped to a specific repository.
#[derive(Clone)]
pub struct OctocrabClient {
    client: Octocrab,
    repo: RepoId,
}

impl OctocrabClient {
    /// Creates a new client scoped to the given repository.
    pub fn new(client: Octocrab, repo: RepoId) -> Self {
        Self { client, repo }
    }

    /// Creates a client from a personal access token.
    pub fn from_token(token: impl Into<String>, repo: RepoId) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client, repo))
    }

    /// Returns the repository this client is scoped to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    fn owner(&self) -> &str {
        &self.repo.owner
    }

    fn repo_name(&self) -> &str {
        &self.repo.repo
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl GitHubApi for OctocrabClient {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>, GitHubApiError> {
        let mut page = 1u32;
        let mut all_prs = Vec::new();

        loop {
            let page_result = self
                .client
                .pulls(self.owner(), self.repo_name())
                .list()
                .state(octocrab::params::State::Open)
                .per_page(100)
                .page(page)
                .send()
                .await?;

            let items = page_result.items;
            let is_last_page = items.len() < 100;

            for pull in items {
                all_prs.push(PullRequest {
                    number: PrNumber(pull.number),
                    head_ref: pull.head.ref_field,
                });
            }

            if is_last_page {
                break;
            }
            page += 1;
        }

        Ok(all_prs)
    }

    async fn create_comment(&self, pr: PrNumber, body: &str) -> Result<(), GitHubApiError> {
        self.client
            .issues(self.owner(), self.repo_name())
            .create_comment(pr.0, body)
            .await?;
        Ok(())
    }

    async fn add_labels(&self, pr: PrNumber, labels: &[String]) -> Result<(), GitHubApiError> {
        self.client
            .issues(self.owner(), self.repo_name())
            .add_labels(pr.0, labels)
            .await?;
        Ok(())
    }

    async fn repo_file(&self, path: &str) -> Result<Option<String>, GitHubApiError> {
        let content = self
            .client
            .repos(self.owner(), self.repo_name())
            .get_content()
            .path(path)
            .send()
            .await?;

        Ok(content
            .items
            .into_iter()
            .next()
            .and_then(|item| item.decoded_content()))
    }
}
