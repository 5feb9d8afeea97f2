//! GitHub API access.
//!
//! The operations the monitor needs (list open PRs, comment, label,
//! fetch a config file) are expressed as the [`GitHubApi`] trait and
//! executed against the real API by [`OctocrabClient`].

mod api;
mod client;
mod error;

pub use api::GitHubApi;
pub use client::OctocrabClient;
pub use error::GitHubApiError;
