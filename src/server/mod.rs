//! HTTP server for the pull-request monitor.
//!
//! # Endpoints
//!
//! - `POST /webhook` - Accepts GitHub webhook deliveries
//! - `GET /health` - Returns 200 if the server is running

use std::sync::Arc;

use octocrab::Octocrab;

use crate::ci::CircleCiClient;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::webhook_handler;

/// Shared application state, passed to handlers via Axum's `State`.
///
/// Both API clients are constructed once at process start from injected
/// configuration and shared across deliveries; the GitHub client is
/// re-scoped to the event's repository per invocation.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Webhook secret for HMAC-SHA256 signature verification.
    webhook_secret: Vec<u8>,

    /// Unscoped GitHub API client.
    github: Octocrab,

    /// CircleCI API client.
    ci: CircleCiClient,
}

impl AppState {
    pub fn new(webhook_secret: impl Into<Vec<u8>>, github: Octocrab, ci: CircleCiClient) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                webhook_secret: webhook_secret.into(),
                github,
                ci,
            }),
        }
    }

    /// Returns the webhook secret.
    pub fn webhook_secret(&self) -> &[u8] {
        &self.inner.webhook_secret
    }

    /// Returns the shared GitHub client.
    pub fn github(&self) -> &Octocrab {
        &self.inner.github
    }

    /// Returns the CircleCI client.
    pub fn ci(&self) -> &CircleCiClient {
        &self.inner.ci
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
