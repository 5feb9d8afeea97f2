//! Markdown comment composition.

use crate::webhooks::CommitRef;

/// Builds the comment posted on each affected pull request.
///
/// The shape is fixed: a header linking the CI build and the failing
/// commit (short SHA), immediately followed by the sanitized log in a
/// fenced code block. The log text follows the opening fence directly,
/// with no separating newline.
pub fn build_comment(target_url: &str, commit: &CommitRef, log: &str) -> String {
    format!(
        "### The [Circle CI build]({target_url}) is failing as of [`{short_sha}`]({commit_url}).\n```{log}\n```",
        short_sha = commit.sha.short(),
        commit_url = commit.html_url,
    )
}
