//! GitHub webhook payload parser.
//!
//! Parses raw webhook JSON into a typed [`StatusEvent`]. The event type
//! comes from the `X-GitHub-Event` header; everything except `status`
//! is ignored by returning `Ok(None)`. Malformed `status` payloads are
//! an error.

use serde::Deserialize;
use thiserror::Error;

use crate::types::{RepoId, Sha};

use super::events::{BranchRef, CommitRef, StatusEvent, StatusState};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Field has a value outside the documented set.
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Parses a webhook payload into a typed event.
///
/// * `Ok(Some(event))` — a `status` event was parsed
/// * `Ok(None)` — any other event type (ignored, not an error)
/// * `Err(e)` — a `status` payload that is malformed
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<Option<StatusEvent>, ParseError> {
    match event_type {
        "status" => parse_status(payload).map(Some),
        _ => Ok(None),
    }
}

// Raw mirror structs matching GitHub's JSON. Optional fields stay
// Option here; required ones are validated by deserialization itself.

#[derive(Debug, Deserialize)]
struct RawStatusPayload {
    state: String,
    name: String,
    context: String,
    target_url: Option<String>,
    commit: RawCommit,
    branches: Vec<RawBranch>,
    repository: RawRepository,
}

#[derive(Debug, Deserialize)]
struct RawCommit {
    sha: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct RawBranch {
    name: String,
    commit: RawBranchCommit,
}

#[derive(Debug, Deserialize)]
struct RawBranchCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    owner: RawOwner,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: String,
}

fn parse_status(payload: &[u8]) -> Result<StatusEvent, ParseError> {
    let raw: RawStatusPayload = serde_json::from_slice(payload)?;

    let state = match raw.state.as_str() {
        "pending" => StatusState::Pending,
        "success" => StatusState::Success,
        "failure" => StatusState::Failure,
        "error" => StatusState::Error,
        other => {
            return Err(ParseError::InvalidField {
                field: "state",
                value: other.to_string(),
            });
        }
    };

    Ok(StatusEvent {
        repo: RepoId::new(raw.repository.owner.login, raw.repository.name),
        state,
        name: raw.name,
        context: raw.context,
        target_url: raw.target_url,
        commit: CommitRef {
            sha: Sha::new(raw.commit.sha),
            html_url: raw.commit.html_url,
        },
        branches: raw
            .branches
            .into_iter()
            .map(|b| BranchRef {
                name: b.name,
                sha: Sha::new(b.commit.sha),
            })
            .collect(),
    })
}
