//! Webhook endpoint handler.
//!
//! Accepts GitHub webhook deliveries, validates signatures, and runs
//! the monitor pipeline inline for `status` failure events. Everything
//! else is acknowledged and ignored.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::github::OctocrabClient;
use crate::monitor::{self, MonitorError, MonitorReport};
use crate::types::DeliveryId;
use crate::webhooks::{parse_webhook, verify_signature, ParseError};

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub delivery ID.
const HEADER_DELIVERY: &str = "x-github-delivery";
/// Header name for GitHub signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing required header.
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    /// Invalid signature.
    #[error("invalid signature")]
    InvalidSignature,

    /// Malformed payload.
    #[error("invalid payload: {0}")]
    Parse(#[from] ParseError),

    /// The monitor pipeline failed before dispatch could run.
    #[error("monitor failed: {0}")]
    Monitor(#[from] MonitorError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::MissingHeader(_) | WebhookError::Parse(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::Monitor(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Required headers: `X-GitHub-Event`, `X-GitHub-Delivery`,
///   `X-Hub-Signature-256`
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 202 Accepted: event handled (or ignored as irrelevant)
/// - 400 Bad Request: missing header or malformed payload
/// - 401 Unauthorized: invalid signature
/// - 500 Internal Server Error: pipeline failure before dispatch
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let event_type = get_header(&headers, HEADER_EVENT)?;
    let delivery_id = DeliveryId::new(get_header(&headers, HEADER_DELIVERY)?);
    let signature = get_header(&headers, HEADER_SIGNATURE)?;

    debug!(delivery_id = %delivery_id, event_type = %event_type, "received webhook");

    // Verify the signature before any parsing.
    if !verify_signature(&body, &signature, app_state.webhook_secret()) {
        warn!(delivery_id = %delivery_id, "invalid webhook signature");
        return Err(WebhookError::InvalidSignature);
    }

    let Some(event) = parse_webhook(&event_type, &body)? else {
        return Ok((StatusCode::ACCEPTED, "Ignored"));
    };

    if !event.state.is_failure() {
        debug!(
            delivery_id = %delivery_id,
            state = event.state.as_str(),
            "status is not a failure, ignoring"
        );
        return Ok((StatusCode::ACCEPTED, "Ignored"));
    }

    let github = OctocrabClient::new(app_state.github().clone(), event.repo.clone());
    let report = monitor::run(&event, &github, app_state.ci()).await?;

    match &report {
        MonitorReport::NoMatchingBranch => info!(
            delivery_id = %delivery_id,
            sha = %event.commit.sha,
            "no branch in the event matches the failing commit"
        ),
        MonitorReport::NoMatchingPullRequests => info!(
            delivery_id = %delivery_id,
            "no open pull request is built from the failing branch"
        ),
        MonitorReport::Notified(_) => info!(
            delivery_id = %delivery_id,
            attempted = report.attempted(),
            failed = report.failed(),
            "flagged failing pull requests"
        ),
    }

    Ok((StatusCode::ACCEPTED, "Accepted"))
}

/// Extracts a required header value as a string.
fn get_header(headers: &HeaderMap, name: &'static str) -> Result<String, WebhookError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .ok_or(WebhookError::MissingHeader(name))
}
