//! Per-repository YAML configuration.
//!
//! Each monitored repository can carry a `.github/pull-request-monitor.yml`
//! choosing the label applied to failing pull requests:
//!
//! ```yaml
//! failedCiLabel: "CI broken"
//! ```
//!
//! Configuration is best-effort: a missing file, an unfetchable file, or
//! a document that fails to parse all fall back to the defaults.

use serde::Deserialize;
use tracing::debug;

use crate::github::GitHubApi;

/// Repository path of the configuration file.
pub const CONFIG_FILE_PATH: &str = ".github/pull-request-monitor.yml";

/// Label applied when the configuration does not name one.
pub const DEFAULT_FAILED_CI_LABEL: &str = "Failing CI";

/// Parsed repository configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoConfig {
    /// Label to apply to pull requests whose CI build failed.
    #[serde(default)]
    pub failed_ci_label: Option<String>,
}

impl RepoConfig {
    /// Parses a YAML document.
    ///
    /// An empty document is valid and yields the defaults.
    pub fn parse(yaml: &str) -> Result<RepoConfig, serde_yaml::Error> {
        let parsed: Option<RepoConfig> = serde_yaml::from_str(yaml)?;
        Ok(parsed.unwrap_or_default())
    }

    /// Loads the configuration for the client's repository.
    ///
    /// Never fails: every problem (fetch error, missing file, parse
    /// error) is logged and degrades to [`RepoConfig::default`].
    pub async fn load<G: GitHubApi>(github: &G) -> RepoConfig {
        let text = match github.repo_file(CONFIG_FILE_PATH).await {
            Ok(Some(text)) => text,
            Ok(None) => return RepoConfig::default(),
            Err(e) => {
                debug!(path = CONFIG_FILE_PATH, error = %e, "config not fetched, using defaults");
                return RepoConfig::default();
            }
        };

        match RepoConfig::parse(&text) {
            Ok(config) => config,
            Err(e) => {
                debug!(path = CONFIG_FILE_PATH, error = %e, "config not parsed, using defaults");
                RepoConfig::default()
            }
        }
    }

    /// The label to apply, falling back to [`DEFAULT_FAILED_CI_LABEL`].
    pub fn failed_ci_label(&self) -> &str {
        self.failed_ci_label
            .as_deref()
            .unwrap_or(DEFAULT_FAILED_CI_LABEL)
    }
}
