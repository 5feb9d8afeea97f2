//! CI build identification and build metadata types.

use regex::Regex;
use serde::Deserialize;

/// The coordinates of one CI build: account, project, build number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRef {
    pub account: String,
    pub project: String,
    pub build_num: u64,
}

impl BuildRef {
    /// Derives the build reference from a status event's `name` and
    /// `target_url`.
    ///
    /// `name` must have the `account/project` form, and the URL must
    /// contain `<name>/<digits>`; the digits are the build number.
    /// Anything else means the status does not point at a recognizable
    /// build, which is "no build" rather than an error.
    pub fn from_status(name: &str, target_url: &str) -> Option<BuildRef> {
        let (account, project) = name.split_once('/')?;
        if account.is_empty() || project.is_empty() {
            return None;
        }

        // The name is data, not a pattern; escape it before embedding.
        let pattern = format!("{}/([0-9]+)", regex::escape(name));
        let re = Regex::new(&pattern).ok()?;
        let captures = re.captures(target_url)?;
        let build_num = captures[1].parse().ok()?;

        Some(BuildRef {
            account: account.to_string(),
            project: project.to_string(),
            build_num,
        })
    }
}

impl std::fmt::Display for BuildRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.account, self.project, self.build_num)
    }
}

/// Build metadata returned by the CI provider's build-lookup endpoint.
///
/// Only the step/action tree is deserialized; everything else in the
/// response is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One build step, an ordered group of actions.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One executed action within a step.
#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    /// Whether the action failed. CircleCI reports `null` for actions
    /// that did not fail.
    pub failed: Option<bool>,

    /// Where the action's raw output can be fetched.
    pub output_url: Option<String>,
}

impl Action {
    pub fn is_failed(&self) -> bool {
        self.failed.unwrap_or(false)
    }
}

/// One entry of an action's output, as returned by its `output_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub message: String,
}
