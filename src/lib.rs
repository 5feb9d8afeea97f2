//! Pull Request Monitor - a GitHub bot that flags failing pull requests.
//!
//! When a commit status turns to `failure`, the monitor finds the open
//! pull requests built from the failing commit's branch, fetches the
//! failing CircleCI build's log, and posts it as a comment plus a
//! configurable label on each of them.

pub mod ci;
pub mod config;
pub mod github;
pub mod monitor;
pub mod server;
pub mod types;
pub mod webhooks;
